pub(crate) mod analysis;
pub(crate) mod errors;
pub(crate) mod questions;
pub(crate) mod router;
pub(crate) mod validation;
