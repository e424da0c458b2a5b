/*!
 * Play grouping and index document assembly.
 *
 * Records are grouped by play id in the order they are first seen, each
 * group's scenes are put in canonical act/scene order, and groups are
 * listed by title.
 */

use log::{debug, warn};
use serde::Serialize;
use std::collections::HashMap;

use crate::collation::compare_titles;
use crate::errors::IndexResult;
use crate::ordering::sort_scenes;
use crate::scene::SceneRecord;

/// All scenes of one play.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayGroup {
    /// Play id shared by every scene in the group
    pub id: String,

    /// Title of the first record seen with this id
    pub title: String,

    /// Number of scenes
    pub scene_count: usize,

    /// Scenes in canonical order
    pub scenes: Vec<SceneRecord>,
}

impl PlayGroup {
    fn new(id: String, title: String) -> Self {
        Self {
            id,
            title,
            scene_count: 0,
            scenes: Vec::new(),
        }
    }
}

/// The consolidated index written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct IndexDocument {
    /// Plays ordered by title
    pub plays: Vec<PlayGroup>,
}

impl IndexDocument {
    /// Total number of scenes across all plays
    pub fn total_scenes(&self) -> usize {
        self.plays.iter().map(|p| p.scene_count).sum()
    }

    /// Pretty printed JSON with a trailing newline
    pub fn to_json(&self) -> IndexResult<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}

/// Group records by play and order everything canonically.
pub fn aggregate<I>(records: I) -> IndexDocument
where
    I: IntoIterator<Item = SceneRecord>,
{
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut plays: Vec<PlayGroup> = Vec::new();

    for record in records {
        let existing = positions.get(&record.play_id).copied();
        let position = match existing {
            Some(position) => {
                let group = &plays[position];
                if group.title != record.play_title {
                    debug!(
                        "Play '{}' keeps title '{}', ignoring '{}' from {}",
                        group.id, group.title, record.play_title, record.path
                    );
                }
                position
            }
            None => {
                if record.play_id.is_empty() {
                    warn!(
                        "Scene {} has neither a play id nor a play title; grouping it under an unnamed play",
                        record.path
                    );
                }
                plays.push(PlayGroup::new(record.play_id.clone(), record.play_title.clone()));
                positions.insert(record.play_id.clone(), plays.len() - 1);
                plays.len() - 1
            }
        };
        plays[position].scenes.push(record);
    }

    for play in &mut plays {
        sort_scenes(&mut play.scenes);
        play.scene_count = play.scenes.len();
    }

    plays.sort_by(|a, b| compare_titles(&a.title, &b.title));

    IndexDocument { plays }
}
