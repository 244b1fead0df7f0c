//! [`Serialisable`] implementations for primitive and world types.

use super::{DataSerialiser, Serialisable, SerialiseError};
use crate::state::{
    BannerIndex, CoordsXY, CoordsXYZ, CoordsXYZD, GroupId, Money, ObjectEntryIndex, PlayerId,
    TILE_ELEMENT_SIZE, TileElement,
};

macro_rules! impl_serialisable_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Serialisable for $ty {
                fn encode(&self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&self.to_be_bytes());
                }

                fn decode(stream: &mut DataSerialiser) -> Result<Self, SerialiseError> {
                    Ok(<$ty>::from_be_bytes(stream.read_array()?))
                }

                fn log(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_serialisable_int!(u8, u16, u32, u64, i8, i16, i32, i64);

impl Serialisable for bool {
    fn encode(&self, out: &mut Vec<u8>) {
        out.push(u8::from(*self));
    }

    fn decode(stream: &mut DataSerialiser) -> Result<Self, SerialiseError> {
        match u8::decode(stream)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(SerialiseError::InvalidValue {
                kind: "bool",
                value: u32::from(other),
            }),
        }
    }
}

impl Serialisable for String {
    fn encode(&self, out: &mut Vec<u8>) {
        let bytes = self.as_bytes();
        let len = bytes.len().min(u16::MAX as usize);
        (len as u16).encode(out);
        out.extend_from_slice(&bytes[..len]);
    }

    fn decode(stream: &mut DataSerialiser) -> Result<Self, SerialiseError> {
        let len = u16::decode(stream)? as usize;
        let bytes = stream.read_bytes(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| SerialiseError::InvalidValue {
            kind: "utf-8 string",
            value: len as u32,
        })
    }

    fn log(&self) -> String {
        format!("{self:?}")
    }
}

impl Serialisable for CoordsXY {
    fn encode(&self, out: &mut Vec<u8>) {
        self.x.encode(out);
        self.y.encode(out);
    }

    fn decode(stream: &mut DataSerialiser) -> Result<Self, SerialiseError> {
        Ok(Self::new(i32::decode(stream)?, i32::decode(stream)?))
    }

    fn log(&self) -> String {
        self.to_string()
    }
}

impl Serialisable for CoordsXYZ {
    fn encode(&self, out: &mut Vec<u8>) {
        self.x.encode(out);
        self.y.encode(out);
        self.z.encode(out);
    }

    fn decode(stream: &mut DataSerialiser) -> Result<Self, SerialiseError> {
        Ok(Self::new(
            i32::decode(stream)?,
            i32::decode(stream)?,
            i32::decode(stream)?,
        ))
    }

    fn log(&self) -> String {
        self.to_string()
    }
}

impl Serialisable for CoordsXYZD {
    fn encode(&self, out: &mut Vec<u8>) {
        self.x.encode(out);
        self.y.encode(out);
        self.z.encode(out);
        self.direction.encode(out);
    }

    fn decode(stream: &mut DataSerialiser) -> Result<Self, SerialiseError> {
        Ok(Self::new(
            i32::decode(stream)?,
            i32::decode(stream)?,
            i32::decode(stream)?,
            u8::decode(stream)?,
        ))
    }

    fn log(&self) -> String {
        self.to_string()
    }
}

impl Serialisable for Money {
    fn encode(&self, out: &mut Vec<u8>) {
        self.0.encode(out);
    }

    fn decode(stream: &mut DataSerialiser) -> Result<Self, SerialiseError> {
        Ok(Self(i64::decode(stream)?))
    }

    fn log(&self) -> String {
        self.to_string()
    }
}

impl Serialisable for PlayerId {
    fn encode(&self, out: &mut Vec<u8>) {
        self.0.encode(out);
    }

    fn decode(stream: &mut DataSerialiser) -> Result<Self, SerialiseError> {
        Ok(Self(i32::decode(stream)?))
    }

    fn log(&self) -> String {
        self.0.to_string()
    }
}

impl Serialisable for GroupId {
    fn encode(&self, out: &mut Vec<u8>) {
        self.0.encode(out);
    }

    fn decode(stream: &mut DataSerialiser) -> Result<Self, SerialiseError> {
        Ok(Self(u8::decode(stream)?))
    }

    fn log(&self) -> String {
        self.0.to_string()
    }
}

impl Serialisable for ObjectEntryIndex {
    fn encode(&self, out: &mut Vec<u8>) {
        self.0.encode(out);
    }

    fn decode(stream: &mut DataSerialiser) -> Result<Self, SerialiseError> {
        Ok(Self(u16::decode(stream)?))
    }
}

impl Serialisable for BannerIndex {
    fn encode(&self, out: &mut Vec<u8>) {
        self.0.encode(out);
    }

    fn decode(stream: &mut DataSerialiser) -> Result<Self, SerialiseError> {
        Ok(Self(u16::decode(stream)?))
    }

    fn log(&self) -> String {
        self.to_string()
    }
}

/// Elements travel as their fixed-size raw record.
impl Serialisable for TileElement {
    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_raw());
    }

    fn decode(stream: &mut DataSerialiser) -> Result<Self, SerialiseError> {
        let raw: [u8; TILE_ELEMENT_SIZE] = stream.read_array()?;
        Ok(TileElement::from_raw(&raw)?)
    }

    fn log(&self) -> String {
        hex::encode(self.to_raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_domain_bool() {
        let mut reader = DataSerialiser::reader(vec![2]);
        let mut flag = false;
        assert_eq!(
            reader.serialise("flag", &mut flag),
            Err(SerialiseError::InvalidValue {
                kind: "bool",
                value: 2
            })
        );
    }

    #[test]
    fn element_with_unknown_type_fails_to_decode() {
        let mut raw = TileElement::default().to_raw();
        raw[0] = 0xEE;
        let mut reader = DataSerialiser::reader(raw.to_vec());
        let mut element = TileElement::default();
        assert!(matches!(
            reader.serialise("element", &mut element),
            Err(SerialiseError::InvalidElement(_))
        ));
    }

    #[test]
    fn string_length_prefix_is_checked() {
        let mut reader = DataSerialiser::reader(vec![0, 5, b'a', b'b']);
        let mut text = String::new();
        assert!(matches!(
            reader.serialise("text", &mut text),
            Err(SerialiseError::UnexpectedEof { .. })
        ));
    }
}
