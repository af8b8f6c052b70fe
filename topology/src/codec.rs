//! User-plugged translation between typed values and the byte-strings that travel
//! inside a [`crate::message::FramedMessage`].

use crate::error::TopologyError;

/// Encodes and decodes the element type of a single operator.
///
/// Implementations are expected to be cheap and infallible in the common case; decode
/// errors propagate to the caller of the collective rather than being swallowed here.
pub trait Codec<T>: Send + Sync {
    /// Serializes `value` to bytes.
    fn encode(&self, value: &T) -> Result<Vec<u8>, TopologyError>;
    /// Deserializes `bytes` back into a `T`.
    fn decode(&self, bytes: &[u8]) -> Result<T, TopologyError>;
}

/// A [`Codec`] built from a pair of closures, for operators that don't want to define a
/// named type just to implement the trait.
pub struct FnCodec<E, D> {
    encode: E,
    decode: D,
}

impl<E, D> FnCodec<E, D> {
    /// Builds a codec from an encode closure and a decode closure.
    pub fn new(encode: E, decode: D) -> Self {
        FnCodec { encode, decode }
    }
}

impl<T, E, D> Codec<T> for FnCodec<E, D>
where
    E: Fn(&T) -> Result<Vec<u8>, TopologyError> + Send + Sync,
    D: Fn(&[u8]) -> Result<T, TopologyError> + Send + Sync,
{
    fn encode(&self, value: &T) -> Result<Vec<u8>, TopologyError> {
        (self.encode)(value)
    }
    fn decode(&self, bytes: &[u8]) -> Result<T, TopologyError> {
        (self.decode)(bytes)
    }
}

/// A [`Codec`] for any `T: Serialize + DeserializeOwned`, backed by `serde_json`.
///
/// Convenient default for operators that don't need a bespoke binary format; the
/// transport treats the resulting bytes as opaque either way.
pub struct JsonCodec;

impl<T> Codec<T> for JsonCodec
where
    T: serde::Serialize + serde::de::DeserializeOwned,
{
    fn encode(&self, value: &T) -> Result<Vec<u8>, TopologyError> {
        serde_json::to_vec(value).map_err(|e| TopologyError::Codec(e.to_string()))
    }
    fn decode(&self, bytes: &[u8]) -> Result<T, TopologyError> {
        serde_json::from_slice(bytes).map_err(|e| TopologyError::Codec(e.to_string()))
    }
}

/// User-supplied associative combiner over an operator's element type.
///
/// Must be associative for the reducer tree to be semantically well-defined; the engine
/// does not enforce this, nor does it enforce commutativity (see `receive_from_children`).
pub trait Reducer<T>: Send + Sync {
    /// Combines a non-empty sequence of values, arrival order, into one.
    fn reduce(&self, values: Vec<T>) -> T;
}

impl<T, F: Fn(Vec<T>) -> T + Send + Sync> Reducer<T> for F {
    fn reduce(&self, values: Vec<T>) -> T {
        self(values)
    }
}
