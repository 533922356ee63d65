//! Serializable world state and its lenient decoder

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::chunk::CHUNK_SIZE;
use super::world::WORLD_HEIGHT;
use crate::persistence::lenient;

/// Largest chunk width accepted from save data
pub const MAX_CHUNK_WIDTH: usize = 256;
/// Largest world height accepted from save data
pub const MAX_WORLD_HEIGHT: usize = 4096;

/// Seeds picked for saves that lost theirs are drawn from `0..MISSING_SEED_RANGE`
const MISSING_SEED_RANGE: u64 = 1_000_000;

/// Persisted form of a `World`: generator inputs plus the non-air cells of
/// every generated chunk, keyed by chunk index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub seed: u64,
    pub chunk_size: usize,
    pub height: usize,
    /// `[world_x, world_y, block_id]` triples per chunk
    pub chunks: BTreeMap<i32, Vec<[i64; 3]>>,
}

impl WorldSnapshot {
    /// Chunk width and height, replacing unusable values with the defaults
    pub fn sanitized_dimensions(&self) -> (usize, usize) {
        (
            sanitize_dimension(self.chunk_size, CHUNK_SIZE, MAX_CHUNK_WIDTH),
            sanitize_dimension(self.height, WORLD_HEIGHT, MAX_WORLD_HEIGHT),
        )
    }

    /// Decode from arbitrary JSON, coercing or dropping whatever does not fit.
    ///
    /// - missing seed: a fresh random seed; non-integer seed: 0
    /// - bad `chunk_size` / `height`: defaults
    /// - non-integer chunk keys, or keys past the last addressable column: chunk skipped
    /// - non-list chunk value: chunk kept but empty
    /// - entries that are not three integers: dropped
    pub fn from_value(value: &Value) -> Self {
        let seed = match value.get("seed") {
            None => rand::random_range(0..MISSING_SEED_RANGE),
            Some(seed) => seed.as_u64().unwrap_or(0),
        };

        let chunk_size = lenient::usize_field(value, "chunk_size")
            .map_or(CHUNK_SIZE, |w| sanitize_dimension(w, CHUNK_SIZE, MAX_CHUNK_WIDTH));
        let height = lenient::usize_field(value, "height")
            .map_or(WORLD_HEIGHT, |h| sanitize_dimension(h, WORLD_HEIGHT, MAX_WORLD_HEIGHT));

        let mut chunks = BTreeMap::new();
        if let Some(raw_chunks) = value.get("chunks").and_then(Value::as_object) {
            for (key, entries) in raw_chunks {
                let Ok(index) = key.trim().parse::<i32>() else {
                    log::warn!("Skipping chunk with non-integer key {:?}", key);
                    continue;
                };
                if !index_in_range(index, chunk_size) {
                    log::warn!("Skipping chunk {} outside the world's columns", index);
                    continue;
                }
                let cells = entries
                    .as_array()
                    .map(|list| list.iter().filter_map(decode_cell).collect())
                    .unwrap_or_default();
                chunks.insert(index, cells);
            }
        }

        Self {
            seed,
            chunk_size,
            height,
            chunks,
        }
    }
}

/// Whether a chunk index covers at least one `i32` world column
fn index_in_range(index: i32, chunk_size: usize) -> bool {
    let width = chunk_size as i32;
    (i32::MIN.div_euclid(width)..=i32::MAX.div_euclid(width)).contains(&index)
}

fn sanitize_dimension(value: usize, default: usize, max: usize) -> usize {
    if value == 0 || value > max {
        default
    } else {
        value
    }
}

fn decode_cell(entry: &Value) -> Option<[i64; 3]> {
    match entry.as_array()?.as_slice() {
        [x, y, id] => Some([x.as_i64()?, y.as_i64()?, id.as_i64()?]),
        _ => None,
    }
}
