//! Time alignment of decomposition channels onto a shared bucket index

mod granularity;

pub use granularity::{Granularity, ParseGranularityError};

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::decompose::DecompositionResult;
use crate::error::AlignError;

/// One of the four decomposition components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Channel {
    Series,
    Seasonal,
    Trend,
    Remainder,
}

impl Channel {
    pub const ALL: [Channel; 4] = [
        Channel::Series,
        Channel::Seasonal,
        Channel::Trend,
        Channel::Remainder,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Channel::Series => "Series",
            Channel::Seasonal => "Seasonal",
            Channel::Trend => "Trend",
            Channel::Remainder => "Remainder",
        }
    }

    fn values(self, result: &DecompositionResult) -> &[f64] {
        match self {
            Channel::Series => &result.series,
            Channel::Seasonal => &result.seasonal,
            Channel::Trend => &result.trend,
            Channel::Remainder => &result.remainder,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bucketed values of a single channel, ordered by bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSeries {
    channel: Channel,
    entries: BTreeMap<i64, f64>,
}

impl ChannelSeries {
    pub fn new(channel: Channel) -> Self {
        Self {
            channel,
            entries: BTreeMap::new(),
        }
    }

    /// Insert a value, replacing whatever the bucket held before.
    /// Returns true if an existing entry was overwritten.
    pub fn add_or_update(&mut self, bucket: i64, value: f64) -> bool {
        self.entries.insert(bucket, value).is_some()
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn name(&self) -> &'static str {
        self.channel.name()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, bucket: i64) -> Option<f64> {
        self.entries.get(&bucket).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.entries.iter().map(|(&bucket, &value)| (bucket, value))
    }

    pub fn buckets(&self) -> impl Iterator<Item = i64> + '_ {
        self.entries.keys().copied()
    }

    /// (min, max) of the finite values, or None if there are none.
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        self.entries
            .values()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// Output of [`align`]: every channel keyed by [`Channel`], all bucketed
/// with the same granularity.
#[derive(Debug, Clone)]
pub struct AlignedChannels {
    granularity: Granularity,
    channels: BTreeMap<Channel, Arc<ChannelSeries>>,
}

impl AlignedChannels {
    pub fn from_series(
        granularity: Granularity,
        series: impl IntoIterator<Item = ChannelSeries>,
    ) -> Self {
        let channels = series
            .into_iter()
            .map(|s| (s.channel(), Arc::new(s)))
            .collect();
        Self {
            granularity,
            channels,
        }
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn get(&self, channel: Channel) -> Option<&Arc<ChannelSeries>> {
        self.channels.get(&channel)
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<ChannelSeries>> {
        self.channels.values()
    }
}

/// Bucket every channel of `result` onto the shared time index.
///
/// Values landing in an occupied bucket overwrite the earlier value. Fails
/// without producing any series if the input arrays differ in length or are
/// empty.
pub fn align(
    result: &DecompositionResult,
    granularity: Granularity,
) -> Result<AlignedChannels, AlignError> {
    let n = result.check_shape()?;

    let buckets = result
        .times
        .iter()
        .map(|&t| granularity.snap(t))
        .collect::<Result<Vec<i64>, _>>()?;

    let mut overwritten = 0usize;
    let series: Vec<ChannelSeries> = Channel::ALL
        .into_iter()
        .map(|channel| {
            let mut s = ChannelSeries::new(channel);
            for (&bucket, &value) in buckets.iter().zip(channel.values(result)) {
                if s.add_or_update(bucket, value) {
                    overwritten += 1;
                }
            }
            s
        })
        .collect();

    let distinct = series.first().map_or(0, ChannelSeries::len);
    log::debug!(
        "aligned {} observations into {} {} buckets",
        n,
        distinct,
        granularity
    );
    if overwritten > 0 {
        log::debug!(
            "{} observations shared a {} bucket and were overwritten by later values",
            overwritten / Channel::ALL.len(),
            granularity
        );
    }

    Ok(AlignedChannels::from_series(granularity, series))
}
