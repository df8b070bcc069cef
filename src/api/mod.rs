pub(crate) mod assignments;
pub(crate) mod errors;
pub(crate) mod guards;
pub(crate) mod handlers;
pub(crate) mod quizzes;
pub(crate) mod router;
pub(crate) mod submissions;
