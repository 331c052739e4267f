use crate::{
    epoch::parse_utc as parse_utc_epoch,
    error::ParsingError,
    prelude::{Duration, Header},
};

#[cfg(feature = "log")]
use log::error;

/// Returns the content that precedes given header label, if the label is found.
fn labelled<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    line.find(label).map(|offset| &line[..offset])
}

impl Header {
    /// Updates [Header] from a single header line.
    /// Unusable numeric fields are reported and ignored,
    /// invalid epochs are fatal.
    pub(crate) fn parse_line(&mut self, line: &str) -> Result<(), ParsingError> {
        if let Some(content) = labelled(line, "COMMENT") {
            self.comments.push(content.trim().to_string());
        } else if let Some(content) = labelled(line, "EPOCH OF FIRST MAP") {
            self.epoch_of_first_map = Some(parse_utc_epoch(content)?);
        } else if let Some(content) = labelled(line, "EPOCH OF LAST MAP") {
            self.epoch_of_last_map = Some(parse_utc_epoch(content)?);
        } else if let Some(content) = labelled(line, "# OF MAPS IN FILE") {
            match content.trim().parse::<usize>() {
                Ok(number) => self.number_of_maps = Some(number),
                Err(e) => {
                    #[cfg(feature = "log")]
                    error!("number of maps parsing error: {}", e);
                },
            }
        } else if let Some(content) = labelled(line, "EXPONENT") {
            match content.trim().parse::<i8>() {
                Ok(exponent) => self.exponent = exponent,
                Err(e) => {
                    #[cfg(feature = "log")]
                    error!("exponent parsing error: {}", e);
                },
            }
        } else if let Some(content) = labelled(line, "INTERVAL") {
            match content.trim().parse::<f64>() {
                Ok(interval) if interval > 0.0 => {
                    self.sampling_period = Duration::from_seconds(interval);
                },
                _ => {
                    #[cfg(feature = "log")]
                    error!("invalid sampling interval \"{}\"", content.trim());
                },
            }
        }

        Ok(())
    }
}
