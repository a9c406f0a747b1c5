// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Tags payload inserted into every log line forwarded for a source.
//!
//! The payload is a sequence of bracketed annotations, always in the order
//! source, source category, tags:
//!
//! ```text
//! [dd ddsource="nginx"][dd ddsourcecategory="webserver"][dd ddtags="env:prod"]
//! ```
//!
//! A source without any of the three gets the single byte `-`.

/// Payload used when a source carries no source, category or tags.
pub const EMPTY_TAGS_PAYLOAD: &[u8] = b"-";

const SOURCE_PREFIX: &[u8] = b"[dd ddsource=\"";
const SOURCE_CATEGORY_PREFIX: &[u8] = b"[dd ddsourcecategory=\"";
const TAGS_PREFIX: &[u8] = b"[dd ddtags=\"";
const SUFFIX: &[u8] = b"\"]";

/// Builds the bytes that will be inserted into the messages of a source.
#[must_use]
pub fn build_tags_payload(tags: &str, source: &str, source_category: &str) -> Vec<u8> {
    let mut payload = Vec::new();
    append_annotation(&mut payload, SOURCE_PREFIX, source);
    append_annotation(&mut payload, SOURCE_CATEGORY_PREFIX, source_category);
    append_annotation(&mut payload, TAGS_PREFIX, tags);

    if payload.is_empty() {
        return EMPTY_TAGS_PAYLOAD.to_vec();
    }
    payload
}

fn append_annotation(payload: &mut Vec<u8>, prefix: &[u8], value: &str) {
    if value.is_empty() {
        return;
    }
    payload.extend_from_slice(prefix);
    payload.extend_from_slice(value.as_bytes());
    payload.extend_from_slice(SUFFIX);
}
