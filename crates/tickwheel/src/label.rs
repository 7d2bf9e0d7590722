use crate::geometry::round_half_away;
use derive_more::{Deref, Display};

pub const DEGREE_SIGN: char = '°';

/// Text shown in the center of the dial, e.g. `-12°`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Display, Deref)]
pub struct DegreeLabel(String);

impl DegreeLabel {
    pub fn from_degree(degree: f64) -> Self {
        Self(format!("{}{}", round_half_away(degree), DEGREE_SIGN))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
