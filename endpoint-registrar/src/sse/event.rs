/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! `text/event-stream` event model and encoding.

use serde::Serialize;
use std::time::Duration;

const KEEP_ALIVE_COMMENT: &str = ": keep-alive\n\n";

/// One event on a `text/event-stream`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SseEvent {
    pub id: Option<String>,
    pub event: Option<String>,
    pub data: String,
    pub retry: Option<Duration>,
}

impl SseEvent {
    pub fn new(data: &str) -> Self {
        Self {
            data: data.to_string(),
            ..Default::default()
        }
    }

    /// Event whose data is the JSON encoding of `value`.
    pub fn json<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        Ok(Self {
            data: serde_json::to_string(value)?,
            ..Default::default()
        })
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_event(mut self, event: &str) -> Self {
        self.event = Some(event.to_string());
        self
    }

    pub fn with_retry(mut self, retry: Duration) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Renders the event frame, terminated by a blank line.
    ///
    /// Multi-line data is split into one `data:` line per line; `\r\n`, `\r` and `\n` all
    /// end a line. Line breaks inside `id` and `event` would end the field early, so they
    /// are replaced by spaces.
    pub fn encode(&self) -> String {
        let mut frame = String::new();
        if let Some(id) = &self.id {
            frame.push_str("id: ");
            frame.push_str(&single_line(id));
            frame.push('\n');
        }
        if let Some(event) = &self.event {
            frame.push_str("event: ");
            frame.push_str(&single_line(event));
            frame.push('\n');
        }
        if let Some(retry) = self.retry {
            frame.push_str(&format!("retry: {}\n", retry.as_millis()));
        }
        let data = self.data.replace("\r\n", "\n").replace('\r', "\n");
        for line in data.split('\n') {
            frame.push_str("data: ");
            frame.push_str(line);
            frame.push('\n');
        }
        frame.push('\n');
        frame
    }

    /// Comment frame used to keep idle streams open.
    pub fn keep_alive_comment() -> &'static str {
        KEEP_ALIVE_COMMENT
    }
}

fn single_line(value: &str) -> String {
    value.replace(&['\r', '\n'][..], " ")
}

#[cfg(test)]
mod tests {
    use super::SseEvent;
    use serde::Serialize;
    use std::time::Duration;

    #[test]
    fn encode_orders_fields_and_terminates_frame() {
        let event = SseEvent::new("hello")
            .with_id("7")
            .with_event("greeting")
            .with_retry(Duration::from_secs(3));

        assert_eq!(
            event.encode(),
            "id: 7\nevent: greeting\nretry: 3000\ndata: hello\n\n"
        );
    }

    #[test]
    fn encode_splits_multiline_data() {
        assert_eq!(
            SseEvent::new("first\r\nsecond\nthird").encode(),
            "data: first\ndata: second\ndata: third\n\n"
        );
        assert_eq!(SseEvent::new("").encode(), "data: \n\n");
    }

    #[test]
    fn encode_treats_lone_carriage_return_as_line_break() {
        assert_eq!(SseEvent::new("a\rb").encode(), "data: a\ndata: b\n\n");
        assert_eq!(
            SseEvent::new("a\r\rb\r\n").encode(),
            "data: a\ndata: \ndata: b\ndata: \n\n"
        );
    }

    #[test]
    fn encode_keeps_id_on_one_line() {
        let event = SseEvent::new("x").with_id("a\nb");

        assert!(event.encode().starts_with("id: a b\n"));
    }

    #[test]
    fn json_event_carries_serialized_payload() {
        #[derive(Serialize)]
        struct Number {
            value: u32,
            even: bool,
        }

        let event = SseEvent::json(&Number {
            value: 20,
            even: true,
        })
        .expect("payload serializes");

        assert_eq!(event.data, r#"{"value":20,"even":true}"#);
        assert_eq!(SseEvent::keep_alive_comment(), ": keep-alive\n\n");
    }
}
