// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

/// A log line read from a source, as raw bytes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Message {
    content: Vec<u8>,
}

impl Message {
    #[must_use]
    pub fn new(content: Vec<u8>) -> Self {
        Self { content }
    }

    #[must_use]
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn set_content(&mut self, content: Vec<u8>) {
        self.content = content;
    }
}
