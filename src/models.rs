//! Sensor channels and filter kinds carried by the telemetry protocol

/// Physical sensor source a sample belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
    Temperature,
    Humidity,
    Distance,
    Illuminance,
}

impl Channel {
    pub const COUNT: usize = 4;
    pub const ALL: [Channel; Channel::COUNT] = [
        Channel::Temperature,
        Channel::Humidity,
        Channel::Distance,
        Channel::Illuminance,
    ];

    /// Map a protocol mode character to a channel
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'T' => Some(Channel::Temperature),
            'H' => Some(Channel::Humidity),
            'D' => Some(Channel::Distance),
            'P' => Some(Channel::Illuminance), // photoresistor
            _ => None,
        }
    }

    pub fn code(self) -> char {
        match self {
            Channel::Temperature => 'T',
            Channel::Humidity => 'H',
            Channel::Distance => 'D',
            Channel::Illuminance => 'P',
        }
    }

    /// Position of this channel in fixed-size tables
    pub fn index(self) -> usize {
        self as usize
    }

    /// Human-readable label with unit, used in log summaries
    pub fn label(self) -> &'static str {
        match self {
            Channel::Temperature => "Temp (C)",
            Channel::Humidity => "Humidity (%)",
            Channel::Distance => "Dist (cm)",
            Channel::Illuminance => "Illuminance (lux)",
        }
    }
}

/// Derived signal a windowed sample belongs to
///
/// The chunk average (`a`) is not a filter kind here: it is a one-shot flag
/// that routes the next number into the per-channel average slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterKind {
    Raw,
    LowPass,
    CustomDifference,
}

impl FilterKind {
    pub const COUNT: usize = 3;
    pub const ALL: [FilterKind; FilterKind::COUNT] = [
        FilterKind::Raw,
        FilterKind::LowPass,
        FilterKind::CustomDifference,
    ];

    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'o' => Some(FilterKind::Raw),
            'l' => Some(FilterKind::LowPass),
            'c' => Some(FilterKind::CustomDifference),
            _ => None,
        }
    }

    pub fn code(self) -> char {
        match self {
            FilterKind::Raw => 'o',
            FilterKind::LowPass => 'l',
            FilterKind::CustomDifference => 'c',
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterKind::Raw => "Original",
            FilterKind::LowPass => "Low Pass Filter",
            FilterKind::CustomDifference => "Custom Filter (Difference)",
        }
    }
}

/// Identifies exactly one sliding window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StreamKey {
    pub channel: Channel,
    pub filter: FilterKind,
}

impl StreamKey {
    pub fn new(channel: Channel, filter: FilterKind) -> Self {
        Self { channel, filter }
    }

    /// Every stream key, channel-major
    pub fn all() -> impl Iterator<Item = StreamKey> {
        Channel::ALL.into_iter().flat_map(|channel| {
            FilterKind::ALL
                .into_iter()
                .map(move |filter| StreamKey::new(channel, filter))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_both_ways() {
        for channel in Channel::ALL {
            assert_eq!(Channel::from_code(channel.code()), Some(channel));
        }
        for filter in FilterKind::ALL {
            assert_eq!(FilterKind::from_code(filter.code()), Some(filter));
        }
        assert_eq!(Channel::from_code('o'), None);
        assert_eq!(FilterKind::from_code('a'), None);
        assert_eq!(FilterKind::from_code('X'), None);
    }

    #[test]
    fn stream_keys_cover_the_cross_product() {
        let keys: Vec<_> = StreamKey::all().collect();
        assert_eq!(keys.len(), Channel::COUNT * FilterKind::COUNT);
        assert_eq!(keys[0], StreamKey::new(Channel::Temperature, FilterKind::Raw));
        assert_eq!(
            keys[keys.len() - 1],
            StreamKey::new(Channel::Illuminance, FilterKind::CustomDifference)
        );
    }
}
