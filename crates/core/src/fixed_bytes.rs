//! Shared implementation of fixed-width byte newtypes.

macro_rules! impl_fixed_bytes {
    ($name:ident, $len:expr, $what:literal) => {
        impl $name {
            pub const LENGTH: usize = $len;
            pub const ZERO: Self = Self([0u8; $len]);

            #[inline]
            pub const fn new(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            pub fn from_slice(slice: &[u8]) -> $crate::CoreResult<Self> {
                if slice.len() != $len {
                    return Err($crate::CoreError::InvalidLength {
                        expected: $len,
                        actual: slice.len(),
                    });
                }
                let mut buf = [0u8; $len];
                buf.copy_from_slice(slice);
                Ok(Self(buf))
            }

            pub fn from_hex_str(value: &str) -> $crate::CoreResult<Self> {
                let bytes = $crate::hex_encoding::decode_hex(value)?;
                Self::from_slice(&bytes)
            }

            #[inline]
            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            #[inline]
            pub fn to_vec(self) -> Vec<u8> {
                self.0.to_vec()
            }

            #[inline]
            pub fn is_zero(&self) -> bool {
                self.0.iter().all(|b| *b == 0)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<[u8; $len]> for $name {
            #[inline]
            fn from(value: [u8; $len]) -> Self {
                Self(value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "0x{}", hex::encode(self.0))
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($what, "({})"), self)
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex_str(s)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = String::deserialize(deserializer)?;
                Self::from_hex_str(&value).map_err(serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use impl_fixed_bytes;
