mod register;
mod transformer;
mod utils;

use std::sync::Arc;

pub use crate::transformer::RegisterTransformer;
pub use sysreg_common::*;

pub(crate) type SharedOptions = Arc<NormalizedTransformOptions>;
