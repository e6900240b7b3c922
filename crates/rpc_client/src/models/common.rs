// Copyright (C) 2021-2025 The donut-conformance contributors.
//
// common.rs file belongs to the donut project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Serde adapters for JSON-RPC quantities.

use donut_core::{decode_hex, parse_quantity, parse_quantity_u64};
use serde::{Deserialize, Deserializer};

pub(crate) fn quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
    let value = String::deserialize(deserializer)?;
    parse_quantity(&value).map_err(serde::de::Error::custom)
}

pub(crate) fn quantity_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = String::deserialize(deserializer)?;
    parse_quantity_u64(&value).map_err(serde::de::Error::custom)
}

pub(crate) fn opt_quantity<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u128>, D::Error> {
    match Option::<String>::deserialize(deserializer)? {
        Some(value) => parse_quantity(&value)
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

pub(crate) fn opt_quantity_u64<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u64>, D::Error> {
    match Option::<String>::deserialize(deserializer)? {
        Some(value) => parse_quantity_u64(&value)
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

pub(crate) fn data<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    match value {
        Some(value) => decode_hex(&value).map_err(serde::de::Error::custom),
        None => Ok(Vec::new()),
    }
}
