/// Stateful protocol decoding: which channel and filter a bare number belongs to
use crate::error::{ContextError, TokenError};
use crate::models::{Channel, FilterKind, StreamKey};
use crate::store::window::SlidingWindowStore;

// Single-character control codes that are not channel or filter codes
const AVERAGE_FLAG_CODE: char = 'a';
const END_OF_SEQUENCE_CODE: char = 'X';

/// Classified frame body
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Channel(Channel),
    Filter(FilterKind),
    AverageFlag,
    EndOfSequence,
    Number(f64),
}

impl Token {
    /// Classify a validated frame body
    ///
    /// Single-character mode codes take priority over numbers, so `"5"` is a
    /// number while `"T"` is always a channel switch.
    pub fn classify(body: &str) -> Result<Self, TokenError> {
        let mut chars = body.chars();
        if let (Some(code), None) = (chars.next(), chars.next()) {
            if let Some(channel) = Channel::from_code(code) {
                return Ok(Token::Channel(channel));
            }
            if let Some(filter) = FilterKind::from_code(code) {
                return Ok(Token::Filter(filter));
            }
            match code {
                AVERAGE_FLAG_CODE => return Ok(Token::AverageFlag),
                END_OF_SEQUENCE_CODE => return Ok(Token::EndOfSequence),
                _ => {}
            }
        }

        match body.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Token::Number(value)),
            _ => Err(TokenError::UnparseableNumber(body.to_string())),
        }
    }
}

/// Outcome of applying one token
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    ModeChanged,
    SampleRecorded { key: StreamKey, value: f64 },
    AverageRecorded { channel: Channel, value: f64 },
    /// `delivered` is false when the snapshot had no consumer left to receive it
    FlushRequested { delivered: bool },
}

/// Decoding state carried across frames
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodingContext {
    pub channel: Option<Channel>,
    pub filter: Option<FilterKind>,
    pub awaiting_average: bool,
}

impl DecodingContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a token, mutating the store for numeric tokens
    ///
    /// `EndOfSequence` yields `FlushRequested { delivered: false }`; publishing
    /// is left to the caller, which owns the output queue. A pending average
    /// flag survives the end-of-sequence token.
    ///
    /// Rejected tokens leave both the context and the store untouched.
    pub fn apply(
        &mut self,
        token: Token,
        store: &mut SlidingWindowStore,
    ) -> Result<Event, ContextError> {
        match token {
            Token::Channel(channel) => {
                self.channel = Some(channel);
                self.awaiting_average = false;
                Ok(Event::ModeChanged)
            }
            Token::Filter(filter) => {
                self.filter = Some(filter);
                self.awaiting_average = false;
                Ok(Event::ModeChanged)
            }
            Token::AverageFlag => {
                self.awaiting_average = true;
                Ok(Event::ModeChanged)
            }
            Token::EndOfSequence => Ok(Event::FlushRequested { delivered: false }),
            Token::Number(value) if self.awaiting_average => {
                let channel = self.channel.ok_or(ContextError::MissingChannel)?;
                store.set_average(channel, value);
                self.awaiting_average = false;
                Ok(Event::AverageRecorded { channel, value })
            }
            Token::Number(value) => match (self.channel, self.filter) {
                (Some(channel), Some(filter)) => {
                    let key = StreamKey::new(channel, filter);
                    store.append(key, value);
                    Ok(Event::SampleRecorded { key, value })
                }
                _ => Err(ContextError::MissingChannelOrFilter),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply_all(
        context: &mut DecodingContext,
        store: &mut SlidingWindowStore,
        bodies: &[&str],
    ) -> Vec<Result<Event, ContextError>> {
        bodies
            .iter()
            .map(|body| context.apply(Token::classify(body).unwrap(), store))
            .collect()
    }

    #[test]
    fn classifies_mode_codes_before_numbers() {
        assert_eq!(Token::classify("T"), Ok(Token::Channel(Channel::Temperature)));
        assert_eq!(Token::classify("P"), Ok(Token::Channel(Channel::Illuminance)));
        assert_eq!(Token::classify("l"), Ok(Token::Filter(FilterKind::LowPass)));
        assert_eq!(Token::classify("a"), Ok(Token::AverageFlag));
        assert_eq!(Token::classify("X"), Ok(Token::EndOfSequence));
        assert_eq!(Token::classify("5"), Ok(Token::Number(5.0)));
        assert_eq!(Token::classify("-21.5"), Ok(Token::Number(-21.5)));
    }

    #[test]
    fn rejects_unparseable_bodies() {
        for body in ["", "x", "TT", "1.2.3", "inf", "NaN"] {
            assert_eq!(
                Token::classify(body),
                Err(TokenError::UnparseableNumber(body.to_string())),
                "body {:?}",
                body
            );
        }
    }

    #[test]
    fn records_sample_into_current_stream() {
        let mut context = DecodingContext::new();
        let mut store = SlidingWindowStore::new(10);
        let events = apply_all(&mut context, &mut store, &["H", "c", "-3.25"]);

        let key = StreamKey::new(Channel::Humidity, FilterKind::CustomDifference);
        assert_eq!(
            events[2],
            Ok(Event::SampleRecorded { key, value: -3.25 })
        );
        assert_eq!(store.window(key), vec![-3.25]);
    }

    #[test]
    fn number_without_filter_is_dropped() {
        let mut context = DecodingContext::new();
        let mut store = SlidingWindowStore::new(10);
        let before = store.snapshot();
        let events = apply_all(&mut context, &mut store, &["T", "12.0"]);

        assert_eq!(events[1], Err(ContextError::MissingChannelOrFilter));
        assert_eq!(store.snapshot(), before);
        assert_eq!(context.channel, Some(Channel::Temperature));
        assert_eq!(context.filter, None);
    }

    #[test]
    fn number_without_channel_is_dropped() {
        let mut context = DecodingContext::new();
        let mut store = SlidingWindowStore::new(10);
        let before = store.snapshot();
        let events = apply_all(&mut context, &mut store, &["o", "12.0"]);

        assert_eq!(events[1], Err(ContextError::MissingChannelOrFilter));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn average_flag_redirects_one_number() {
        let mut context = DecodingContext::new();
        let mut store = SlidingWindowStore::new(10);
        let events = apply_all(&mut context, &mut store, &["T", "o", "a", "22.5", "23.0"]);

        assert_eq!(
            events[3],
            Ok(Event::AverageRecorded {
                channel: Channel::Temperature,
                value: 22.5
            })
        );
        assert_eq!(store.average(Channel::Temperature), Some(22.5));
        assert!(!context.awaiting_average);
        // only the number after the one-shot flag lands in the window
        assert_eq!(
            store.window(StreamKey::new(Channel::Temperature, FilterKind::Raw)),
            vec![23.0]
        );
    }

    #[test]
    fn average_without_filter_leaves_windows_unchanged() {
        let mut context = DecodingContext::new();
        let mut store = SlidingWindowStore::new(10);
        apply_all(&mut context, &mut store, &["T", "a", "22.5"]);

        assert_eq!(store.average(Channel::Temperature), Some(22.5));
        for key in StreamKey::all() {
            assert!(store.window(key).is_empty());
        }
    }

    #[test]
    fn average_without_channel_keeps_flag() {
        let mut context = DecodingContext::new();
        let mut store = SlidingWindowStore::new(10);
        let events = apply_all(&mut context, &mut store, &["a", "22.5"]);

        assert_eq!(events[1], Err(ContextError::MissingChannel));
        assert!(context.awaiting_average);
        for channel in Channel::ALL {
            assert_eq!(store.average(channel), None);
        }
    }

    #[test]
    fn mode_codes_clear_pending_average() {
        let mut context = DecodingContext::new();
        let mut store = SlidingWindowStore::new(10);

        apply_all(&mut context, &mut store, &["a", "D"]);
        assert!(!context.awaiting_average);

        apply_all(&mut context, &mut store, &["a", "l"]);
        assert!(!context.awaiting_average);
    }

    #[test]
    fn end_of_sequence_keeps_pending_average() {
        let mut context = DecodingContext::new();
        let mut store = SlidingWindowStore::new(10);
        let events = apply_all(&mut context, &mut store, &["H", "o", "a", "X", "55"]);

        assert_eq!(events[3], Ok(Event::FlushRequested { delivered: false }));
        assert_eq!(
            events[4],
            Ok(Event::AverageRecorded {
                channel: Channel::Humidity,
                value: 55.0
            })
        );
        assert!(store
            .window(StreamKey::new(Channel::Humidity, FilterKind::Raw))
            .is_empty());
    }
}
