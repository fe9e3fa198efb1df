// Copyright (c) Contributors to the Strata project.
// SPDX-License-Identifier: Apache-2.0

//! Age- and count-based pruning of tag history: decide which records in a
//! tag stream are old enough (or deep enough) to drop, while never leaving
//! a stream empty unless every one of its records qualifies.

use chrono::{DateTime, Utc};

use crate::storage::TagStorage;
use crate::tracking::{Tag, TagSpec};
use crate::Result;

/// Age and count thresholds governing which tag records a prune pass drops.
/// Any field left `None` does not contribute to the decision.
#[derive(Debug, Clone, Default)]
pub struct PruneParameters {
    /// Drop records at least this old...
    pub prune_if_older_than: Option<DateTime<Utc>>,
    /// ...unless they are also newer than this.
    pub keep_if_newer_than: Option<DateTime<Utc>>,
    /// Drop records once a stream holds more than this many...
    pub prune_if_more_than: Option<usize>,
    /// ...unless doing so would leave fewer than this many behind.
    pub keep_if_less_than: Option<usize>,
}

/// Decide which of `history`'s records (oldest first, as returned by
/// [`TagStorage`]) a prune pass with `params` would drop, as of `now`.
///
/// A record is kept outright if `keep_if_newer_than` or `keep_if_less_than`
/// protects it, checked before either prune condition. Otherwise it is
/// dropped if it is older than `prune_if_older_than` or deeper than
/// `prune_if_more_than` records from the head. If every record in the
/// stream qualifies for removal, all of them are returned — emptying the
/// stream is permitted in that case, never otherwise.
pub fn records_to_prune(history: &[Tag], now: DateTime<Utc>, params: &PruneParameters) -> Vec<Tag> {
    let len = history.len();
    history
        .iter()
        .enumerate()
        .filter_map(|(i, tag)| {
            let depth_from_head = len - 1 - i;

            if let Some(keep_if_newer_than) = params.keep_if_newer_than {
                if tag.time >= keep_if_newer_than {
                    return None;
                }
            }
            if let Some(keep_if_less_than) = params.keep_if_less_than {
                if depth_from_head < keep_if_less_than {
                    return None;
                }
            }

            let mut prune = false;
            if let Some(prune_if_older_than) = params.prune_if_older_than {
                if tag.time <= prune_if_older_than {
                    prune = true;
                }
            }
            if let Some(prune_if_more_than) = params.prune_if_more_than {
                if depth_from_head >= prune_if_more_than {
                    prune = true;
                }
            }
            prune.then(|| tag.clone())
        })
        .collect()
}

/// Apply [`records_to_prune`] to a single tag stream in `storage` and
/// rewrite it with those records removed, returning the number dropped.
pub fn prune_stream(
    storage: &TagStorage,
    spec: &TagSpec,
    now: DateTime<Utc>,
    params: &PruneParameters,
) -> Result<usize> {
    let history = storage.read_stream(&spec.org, &spec.name)?;
    let to_remove = records_to_prune(&history, now, params);
    if to_remove.is_empty() {
        return Ok(0);
    }
    let kept: Vec<Tag> = history.into_iter().filter(|t| !to_remove.contains(t)).collect();
    storage.replace_stream(&spec.org, &spec.name, &kept)?;
    Ok(to_remove.len())
}

/// Apply a prune pass to every tag stream in `storage`, returning the total
/// number of records removed.
pub fn prune_all(storage: &TagStorage, now: DateTime<Utc>, params: &PruneParameters) -> Result<usize> {
    let mut total = 0;
    for spec in storage.iter_tags()? {
        total += prune_stream(storage, &spec, now, params)?;
    }
    Ok(total)
}

#[cfg(test)]
#[path = "./prune_test.rs"]
mod prune_test;
