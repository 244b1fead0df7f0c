//! Bidirectional binary stream used to transmit actions.
//!
//! A [`DataSerialiser`] is created in one of three modes. Actions describe
//! their fields once, through [`DataSerialiser::serialise`], and the mode
//! decides whether the field is written, read back into place, or rendered as
//! a `name = value` pair for desync diagnostics.
//!
//! The wire format is untagged and big-endian: fields follow each other in
//! declaration order with no names or lengths, except strings which carry a
//! `u16` byte length.
mod error;
mod primitives;

pub use error::SerialiseError;

use std::fmt;

/// What a [`DataSerialiser`] does with the fields passed through it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamMode {
    Write,
    Read,
    Log,
}

/// A value that can travel through a [`DataSerialiser`].
pub trait Serialisable: Sized + fmt::Debug {
    /// Appends the wire form of `self`.
    fn encode(&self, out: &mut Vec<u8>);

    /// Reads a value from the stream's cursor.
    fn decode(stream: &mut DataSerialiser) -> Result<Self, SerialiseError>;

    /// Human-readable rendering used in log mode.
    fn log(&self) -> String {
        format!("{self:?}")
    }
}

/// Field stream in write, read or log mode.
#[derive(Clone, Debug)]
pub struct DataSerialiser {
    mode: StreamMode,
    buffer: Vec<u8>,
    cursor: usize,
    logged: Vec<(&'static str, String)>,
}

impl DataSerialiser {
    /// Stream that appends every field to an internal buffer.
    pub fn writer() -> Self {
        Self::with_mode(StreamMode::Write, Vec::new())
    }

    /// Stream that reads fields from `bytes` in order.
    pub fn reader(bytes: impl Into<Vec<u8>>) -> Self {
        Self::with_mode(StreamMode::Read, bytes.into())
    }

    /// Stream that records fields as `name = value` pairs.
    pub fn logger() -> Self {
        Self::with_mode(StreamMode::Log, Vec::new())
    }

    fn with_mode(mode: StreamMode, buffer: Vec<u8>) -> Self {
        Self {
            mode,
            buffer,
            cursor: 0,
            logged: Vec::new(),
        }
    }

    pub fn mode(&self) -> StreamMode {
        self.mode
    }

    pub fn is_saving(&self) -> bool {
        self.mode == StreamMode::Write
    }

    pub fn is_loading(&self) -> bool {
        self.mode == StreamMode::Read
    }

    pub fn is_logging(&self) -> bool {
        self.mode == StreamMode::Log
    }

    /// Passes one named field through the stream.
    ///
    /// # Errors
    ///
    /// In read mode, fails when the remaining bytes do not hold a valid value.
    pub fn serialise<T: Serialisable>(
        &mut self,
        name: &'static str,
        value: &mut T,
    ) -> Result<(), SerialiseError> {
        match self.mode {
            StreamMode::Write => value.encode(&mut self.buffer),
            StreamMode::Read => *value = T::decode(self)?,
            StreamMode::Log => self.logged.push((name, value.log())),
        }
        Ok(())
    }

    /// Consumes the next `N` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SerialiseError::UnexpectedEof`] if fewer than `N` bytes remain.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], SerialiseError> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Consumes the next `len` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SerialiseError::UnexpectedEof`] if fewer than `len` bytes remain.
    pub fn read_bytes(&mut self, len: usize) -> Result<&[u8], SerialiseError> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(SerialiseError::UnexpectedEof {
                needed: len,
                remaining,
            });
        }
        let start = self.cursor;
        self.cursor += len;
        Ok(&self.buffer[start..self.cursor])
    }

    /// Returns the next `N` bytes without consuming them.
    ///
    /// # Errors
    ///
    /// Returns [`SerialiseError::UnexpectedEof`] if fewer than `N` bytes remain.
    pub fn peek_array<const N: usize>(&self) -> Result<[u8; N], SerialiseError> {
        let remaining = self.remaining();
        if N > remaining {
            return Err(SerialiseError::UnexpectedEof {
                needed: N,
                remaining,
            });
        }
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buffer[self.cursor..self.cursor + N]);
        Ok(out)
    }

    /// Bytes not yet consumed by a reader.
    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.cursor)
    }

    /// Checks that a reader consumed its whole payload.
    ///
    /// # Errors
    ///
    /// Returns [`SerialiseError::TrailingBytes`] when bytes are left over.
    pub fn finish(&self) -> Result<(), SerialiseError> {
        match self.remaining() {
            0 => Ok(()),
            left => Err(SerialiseError::TrailingBytes(left)),
        }
    }

    /// Written bytes (write mode) or the whole payload (read mode).
    pub fn bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Fields recorded in log mode, in stream order.
    pub fn logged_fields(&self) -> &[(&'static str, String)] {
        &self.logged
    }

    /// Logged fields rendered as `name = value, ...`.
    pub fn log_line(&self) -> String {
        self.logged
            .iter()
            .map(|(name, value)| format!("{name} = {value}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CoordsXYZD, Money};

    #[test]
    fn write_then_read_restores_fields_in_order() {
        let mut location = CoordsXYZD::new(160, -32, 48, 3);
        let mut label = String::from("north gate");
        let mut cost = Money(-75);

        let mut writer = DataSerialiser::writer();
        writer.serialise("location", &mut location).unwrap();
        writer.serialise("label", &mut label).unwrap();
        writer.serialise("cost", &mut cost).unwrap();
        let bytes = writer.into_bytes();
        assert_eq!(bytes.len(), 13 + 2 + 10 + 8);

        let mut reader = DataSerialiser::reader(bytes);
        let mut location_back = CoordsXYZD::default();
        let mut label_back = String::new();
        let mut cost_back = Money::ZERO;
        reader.serialise("location", &mut location_back).unwrap();
        reader.serialise("label", &mut label_back).unwrap();
        reader.serialise("cost", &mut cost_back).unwrap();
        reader.finish().unwrap();

        assert_eq!(location_back, location);
        assert_eq!(label_back, label);
        assert_eq!(cost_back, cost);
    }

    #[test]
    fn integers_are_big_endian() {
        let mut value = 0x0102_0304u32;
        let mut writer = DataSerialiser::writer();
        writer.serialise("value", &mut value).unwrap();
        assert_eq!(writer.bytes(), &[1, 2, 3, 4]);
    }

    #[test]
    fn truncated_payload_fails() {
        let mut reader = DataSerialiser::reader(vec![0, 1]);
        let mut value = 0u32;
        assert_eq!(
            reader.serialise("value", &mut value),
            Err(SerialiseError::UnexpectedEof {
                needed: 4,
                remaining: 2
            })
        );
    }

    #[test]
    fn log_mode_records_names_without_touching_values() {
        let mut player = 7i32;
        let mut group = 2u8;
        let mut logger = DataSerialiser::logger();
        logger.serialise("player", &mut player).unwrap();
        logger.serialise("group", &mut group).unwrap();

        assert!(logger.bytes().is_empty());
        assert_eq!(logger.log_line(), "player = 7, group = 2");
        assert_eq!(player, 7);
    }
}
