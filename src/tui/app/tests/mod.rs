pub(crate) use super::*;
pub(crate) use crate::tui::test_utils::{make_key, seeded_app};
