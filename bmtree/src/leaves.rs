use crate::bytes::Bytes32;
use crate::error::{InputError, Result};
use crate::options::TreeOptions;
use alloy_primitives::U256;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// A leaf payload: an unsigned 256-bit integer, non-zero and unique within a tree.
pub type DataValue = U256;

pub trait ToDataValue {
    fn to_data_value(&self) -> DataValue;
}

impl ToDataValue for U256 {
    fn to_data_value(&self) -> DataValue {
        *self
    }
}

macro_rules! impl_to_data_value {
    ($($t:ty),*) => {
        $(
            impl ToDataValue for $t {
                fn to_data_value(&self) -> DataValue {
                    U256::from(*self)
                }
            }
        )*
    };
}

impl_to_data_value!(u8, u16, u32, u64, u128, usize);

/// Validated input values with their leaf hashes, in input order.
#[derive(Debug, Clone)]
pub struct Leaves {
    entries: Vec<(DataValue, Bytes32)>,
    lookup: HashMap<DataValue, Bytes32>,
}

impl Leaves {
    /// Checks the value set and hashes every value.
    ///
    /// Fails with [`InputError`] when fewer than two values are given, when a
    /// value is zero, or when a value repeats.
    pub fn validate<I, V>(values: I, options: &TreeOptions) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: ToDataValue,
    {
        let values: Vec<DataValue> = values.into_iter().map(|v| v.to_data_value()).collect();
        if values.len() < 2 {
            return Err(InputError::TooFewValues(values.len()).into());
        }

        let mut positions: HashMap<DataValue, usize> = HashMap::with_capacity(values.len());
        for (i, value) in values.iter().enumerate() {
            if value.is_zero() {
                return Err(InputError::ZeroValue(i).into());
            }
            match positions.entry(*value) {
                Entry::Occupied(first) => {
                    return Err(InputError::DuplicateValue {
                        value: *value,
                        first: *first.get(),
                        second: i,
                    }
                    .into());
                }
                Entry::Vacant(slot) => {
                    slot.insert(i);
                }
            }
        }

        let entries: Vec<(DataValue, Bytes32)> = values
            .into_iter()
            .map(|v| (v, options.hash_leaf(&v)))
            .collect();
        let lookup = entries.iter().copied().collect();

        Ok(Self { entries, lookup })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[(DataValue, Bytes32)] {
        &self.entries
    }

    pub fn hashes(&self) -> Vec<Bytes32> {
        self.entries.iter().map(|(_, h)| *h).collect()
    }

    pub fn hash_of(&self, value: &DataValue) -> Option<&Bytes32> {
        self.lookup.get(value)
    }
}
