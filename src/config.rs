use serde::{Deserialize, Serialize};

use crate::alphabet::Alphabet;
use crate::error::{Error, Result};
use crate::markup::DEFAULT_MARKER;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcceleratorConfig {
    pub marker: char,
    pub alphabet: Alphabet,
}

impl Default for AcceleratorConfig {
    fn default() -> Self {
        AcceleratorConfig {
            marker: DEFAULT_MARKER,
            alphabet: Alphabet::default(),
        }
    }
}

impl AcceleratorConfig {
    pub fn with_alphabet(alphabet: Alphabet) -> Self {
        AcceleratorConfig {
            alphabet,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        let marker = self.marker;
        if marker.is_alphanumeric() || marker.is_whitespace() || marker.is_control() {
            return Err(Error::InvalidMarker(marker));
        }
        if self.alphabet.contains(marker) {
            return Err(Error::MarkerInAlphabet(marker));
        }
        Ok(())
    }
}
