//! Lenient GAF (gEDA schematic) reader
//!
//! Produces the object list consumed by the importer. Only the records the
//! importer needs are decoded:
//!
//! - `v <date> <fileformat>`: version line
//! - `C x y selectable angle mirror basename`: component
//! - `N x1 y1 x2 y2 color`: net segment
//! - `{ ... }`: attribute block attached to the preceding object
//!
//! Every other record is kept as `GafObjectType::Other` with no fields. Records
//! that carry payload lines (`T`, `H`, embedded `G` pictures) and embedded
//! symbol definitions (`[ ... ]`) are skipped as a unit so their payload is
//! never mistaken for a record.

use super::errors::{GafError, GafResult};
use crate::models::gaf::{GafModel, GafObject};

/// Parse GAF source text into a model
pub fn parse_gaf(source: &str) -> GafResult<GafModel> {
    GafReader::new(source).read()
}

struct GafReader<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> GafReader<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            lines: source.lines().collect(),
            pos: 0,
        }
    }

    /// 1-based number of the line most recently consumed
    fn line_no(&self) -> usize {
        self.pos
    }

    fn next_line(&mut self) -> Option<&'a str> {
        let line = self.lines.get(self.pos).copied();
        if line.is_some() {
            self.pos += 1;
        }
        line
    }

    fn skip_lines(&mut self, count: usize) -> GafResult<()> {
        let line = self.line_no();
        let remaining = self.lines.len() - self.pos;
        if remaining < count {
            return Err(GafError::UnexpectedEof {
                line,
                expected: count - remaining,
            });
        }
        self.pos += count;
        Ok(())
    }

    fn read(mut self) -> GafResult<GafModel> {
        let mut model = GafModel::default();

        while let Some(raw) = self.next_line() {
            let line = raw.trim_end();
            let Some(tag) = line.chars().next() else {
                continue;
            };

            match tag {
                'v' => model.version = Some(line[1..].trim().to_string()),
                '{' => {
                    let attributes = self.read_attribute_block()?;
                    match model.objects.last_mut() {
                        Some(owner) => owner.attributes.extend(attributes),
                        None => log::warn!(
                            "GAF line {}: attribute block without owning object",
                            self.line_no()
                        ),
                    }
                }
                '[' => self.skip_embedded_symbol()?,
                'C' => model.objects.push(self.read_component(line)?),
                'N' => model.objects.push(self.read_net(line)?),
                _ => {
                    self.skip_payload(tag, line)?;
                    model.objects.push(GafObject::other(tag));
                }
            }
        }

        log::debug!(
            "GAF: read {} objects ({} components, {} nets)",
            model.objects.len(),
            model.components().count(),
            model.nets().count()
        );
        Ok(model)
    }

    fn malformed(&self, record: char, reason: impl Into<String>) -> GafError {
        GafError::MalformedRecord {
            line: self.line_no(),
            record,
            reason: reason.into(),
        }
    }

    fn numbers(&self, record: char, fields: &[&str], count: usize) -> GafResult<Vec<f64>> {
        if fields.len() < count {
            return Err(self.malformed(
                record,
                format!("expected {} numeric fields, found {}", count, fields.len()),
            ));
        }
        fields[..count]
            .iter()
            .map(|f| {
                f.parse::<f64>()
                    .map_err(|_| self.malformed(record, format!("'{}' is not a number", f)))
            })
            .collect()
    }

    fn read_component(&self, line: &str) -> GafResult<GafObject> {
        let fields: Vec<&str> = line.split_whitespace().skip(1).collect();
        let numbers = self.numbers('C', &fields, 5)?;
        let basename = fields
            .get(5)
            .ok_or_else(|| self.malformed('C', "missing symbol basename"))?;
        Ok(GafObject::component(numbers[0], numbers[1], *basename))
    }

    fn read_net(&self, line: &str) -> GafResult<GafObject> {
        let fields: Vec<&str> = line.split_whitespace().skip(1).collect();
        let n = self.numbers('N', &fields, 4)?;
        Ok(GafObject::net(n[0], n[1], n[2], n[3]))
    }

    /// Number of payload lines announced by the last field of a record
    fn announced_lines(&self, record: char, line: &str, min_fields: usize) -> GafResult<usize> {
        let fields: Vec<&str> = line.split_whitespace().skip(1).collect();
        if fields.len() < min_fields {
            // file format 1 text records carry exactly one line and no count
            return Ok(1);
        }
        let last = fields[fields.len() - 1];
        last.parse::<usize>()
            .map_err(|_| self.malformed(record, format!("'{}' is not a line count", last)))
    }

    fn skip_payload(&mut self, tag: char, line: &str) -> GafResult<()> {
        match tag {
            'T' => {
                let count = self.announced_lines('T', line, 9)?;
                self.skip_lines(count)
            }
            'H' => {
                let count = self.announced_lines('H', line, 13)?;
                self.skip_lines(count)
            }
            'G' => self.skip_picture(line),
            _ => Ok(()),
        }
    }

    /// `G x y width height angle mirrored embedded` + filename (+ data up to `.`)
    fn skip_picture(&mut self, line: &str) -> GafResult<()> {
        self.skip_lines(1)?;
        let embedded = line.split_whitespace().nth(7) == Some("1");
        if !embedded {
            return Ok(());
        }
        let start = self.line_no();
        while let Some(data) = self.next_line() {
            if data.trim_end() == "." {
                return Ok(());
            }
        }
        Err(GafError::UnterminatedBlock { line: start })
    }

    /// Read `{ ... }`, collecting `name=value` text lines
    fn read_attribute_block(&mut self) -> GafResult<Vec<(String, String)>> {
        let start = self.line_no();
        let mut attributes = Vec::new();

        while let Some(raw) = self.next_line() {
            let line = raw.trim_end();
            match line.chars().next() {
                Some('}') => return Ok(attributes),
                Some('T') => {
                    let count = self.announced_lines('T', line, 9)?;
                    for _ in 0..count {
                        let text = self
                            .next_line()
                            .ok_or(GafError::UnexpectedEof { line: self.line_no(), expected: 1 })?;
                        if let Some((name, value)) = text.split_once('=') {
                            attributes.push((name.to_string(), value.to_string()));
                        }
                    }
                }
                _ => {}
            }
        }
        Err(GafError::UnterminatedBlock { line: start })
    }

    /// Skip `[ ... ]`, honouring nesting
    fn skip_embedded_symbol(&mut self) -> GafResult<()> {
        let start = self.line_no();
        let mut depth = 1usize;
        while let Some(raw) = self.next_line() {
            let line = raw.trim_end();
            match line.chars().next() {
                Some('[') => depth += 1,
                Some(']') => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                Some(tag @ ('T' | 'H' | 'G')) => self.skip_payload(tag, line)?,
                _ => {}
            }
        }
        Err(GafError::UnterminatedBlock { line: start })
    }
}
