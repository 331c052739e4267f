use crate::{
    epoch::parse_utc as parse_utc_epoch,
    error::ParsingError,
    prelude::{Epoch, Grid, Header},
};

use std::io::{BufRead, BufReader, Read};

#[cfg(feature = "log")]
use log::{trace, warn};

/// Kind of map block currently being parsed
#[derive(Debug, Copy, Clone, PartialEq)]
enum MapKind {
    Tec,
    Rms,
    Height,
}

impl MapKind {
    /// Identifies a block opening marker
    fn opened_by(line: &str) -> Option<Self> {
        if line.contains("START OF TEC MAP") {
            Some(Self::Tec)
        } else if line.contains("START OF RMS MAP") {
            Some(Self::Rms)
        } else if line.contains("START OF HEIGHT MAP") {
            Some(Self::Height)
        } else {
            None
        }
    }

    /// Identifies a block closing marker
    fn closed_by(line: &str) -> Option<Self> {
        if line.contains("END OF TEC MAP") {
            Some(Self::Tec)
        } else if line.contains("END OF RMS MAP") {
            Some(Self::Rms)
        } else if line.contains("END OF HEIGHT MAP") {
            Some(Self::Height)
        } else {
            None
        }
    }
}

/// Map block being assembled
#[derive(Debug)]
struct Block {
    kind: MapKind,
    rows: Vec<Vec<f64>>,
    row: Option<Vec<f64>>,
}

impl Block {
    fn new(kind: MapKind) -> Self {
        Self {
            kind,
            rows: Vec::with_capacity(71),
            row: None,
        }
    }

    /// Closes pending row (if any)
    fn push_row(&mut self) {
        if let Some(row) = self.row.take() {
            if !row.is_empty() {
                self.rows.push(row);
            }
        }
    }
}

/// Parsed map section
#[derive(Debug, Default)]
pub(crate) struct Maps {
    pub tec: Vec<Grid>,
    pub rms: Vec<Grid>,
    pub epochs: Vec<Epoch>,
}

impl Maps {
    /// Closes given block, storing the resulting [Grid].
    fn flush(&mut self, mut block: Block) -> Result<(), ParsingError> {
        block.push_row();

        match block.kind {
            MapKind::Tec => {
                let grid = Grid::from_rows(self.tec.len(), &block.rows)?;
                self.tec.push(grid);
            },
            MapKind::Rms => {
                let grid = Grid::from_rows(self.rms.len(), &block.rows)?;
                self.rms.push(grid);
            },
            MapKind::Height => {
                // height maps are not supported
            },
        }

        Ok(())
    }
}

/// Parses integer values of a data line. The whole line is rejected
/// as soon as one token is not an integer: maps are interleaved with
/// annotations that are not worth parsing.
fn parse_data_line(line: &str) -> Option<Vec<f64>> {
    line.split_ascii_whitespace()
        .map(|item| item.parse::<i64>().ok().map(|value| value as f64))
        .collect()
}

/// Parses [Header] and all maps, by consuming [BufReader].
pub(crate) fn parse_maps<R: Read>(
    reader: &mut BufReader<R>,
) -> Result<(Header, Maps), ParsingError> {
    let mut header = Header::default();
    let mut maps = Maps::default();

    let mut in_header = true;
    let mut block = Option::<Block>::None;

    let mut line_buf = String::with_capacity(128);

    loop {
        line_buf.clear();

        let size = reader.read_line(&mut line_buf)?;

        if size == 0 {
            // reached EOS
            break;
        }

        let line = line_buf.trim_end();

        if in_header {
            if line.contains("END OF HEADER") {
                in_header = false;
                continue;
            }

            if MapKind::opened_by(line).is_none() {
                header.parse_line(line)?;
                continue;
            }

            // header section was omitted
            in_header = false;
        }

        if let Some(kind) = MapKind::opened_by(line) {
            if let Some(pending) = block.take() {
                #[cfg(feature = "log")]
                warn!("{:?} map was not closed", pending.kind);

                maps.flush(pending)?;
            }

            #[cfg(feature = "log")]
            trace!("new {:?} map", kind);

            block = Some(Block::new(kind));
            continue;
        }

        if let Some(_kind) = MapKind::closed_by(line) {
            match block.take() {
                Some(pending) => {
                    maps.flush(pending)?;
                },
                None => {
                    #[cfg(feature = "log")]
                    warn!("closing {:?} map that was never opened", _kind);
                },
            }
            continue;
        }

        if line.contains("END OF FILE") {
            break;
        }

        let pending = match block.as_mut() {
            Some(pending) => pending,
            None => continue,
        };

        if line.contains("EPOCH OF CURRENT MAP") {
            if pending.kind == MapKind::Tec {
                maps.epochs.push(parse_utc_epoch(line)?);
            }
            continue;
        }

        if line.contains("LAT/LON1/LON2/DLON/H") {
            pending.push_row();
            pending.row = Some(Vec::with_capacity(73));
            continue;
        }

        if let Some(row) = pending.row.as_mut() {
            match parse_data_line(line) {
                Some(values) => row.extend(values),
                None => {
                    #[cfg(feature = "log")]
                    trace!("skipped line \"{}\"", line);
                },
            }
        }
    }

    // unterminated last block: the file may have been cut short
    if let Some(pending) = block.take() {
        let kind = pending.kind;

        #[cfg(feature = "log")]
        warn!("{:?} map was not closed at end of file", kind);

        match maps.flush(pending) {
            Ok(()) => {},
            Err(_e @ ParsingError::IncompleteMap { .. }) => {
                #[cfg(feature = "log")]
                warn!("dropped truncated {:?} map: {}", kind, _e);

                if kind == MapKind::Tec {
                    maps.epochs.truncate(maps.tec.len());
                }
            },
            Err(e) => return Err(e),
        }
    }

    if maps.tec.is_empty() {
        return Err(ParsingError::NoTecMap);
    }

    if let Some(expected) = header.number_of_maps {
        if expected != maps.tec.len() {
            #[cfg(feature = "log")]
            warn!(
                "{} maps announced, but {} were found",
                expected,
                maps.tec.len()
            );
        }
    }

    Ok((header, maps))
}
