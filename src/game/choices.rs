use crate::catalog::{CatalogIndex, Song, SongFilter, SongId};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use tracing::warn;

/// Adds songs from `candidates` whose name was not seen yet to `picked`,
/// until `wanted` songs are picked.
fn pick_unique_names<'a>(
    candidates: &[&'a Song],
    seen_names: &mut HashSet<&'a str>,
    picked: &mut Vec<&'a Song>,
    wanted: usize,
) {
    for &song in candidates {
        if picked.len() >= wanted {
            return;
        }
        if seen_names.insert(song.name.as_str()) {
            picked.push(song);
        }
    }
}

/// The options of one question, `songs[correct_index]` is the correct song.
#[derive(Debug)]
pub struct Choices<'a> {
    pub songs: Vec<&'a Song>,
    pub correct_index: usize,
}

/// Picks `num_choices` songs for a question about `correct`: the correct
/// song plus distractors whose names differ from each other and from the
/// correct one, in random order.
///
/// Distractors come from the filtered catalog first and from the whole
/// catalog when the filtered one runs short. A catalog with too few
/// distinct names yields repeated names, a catalog with too few songs
/// yields fewer choices.
pub fn select_choices<'a, R: Rng + ?Sized>(
    catalog: &'a CatalogIndex,
    correct: &'a Song,
    num_choices: usize,
    filter: &SongFilter,
    rng: &mut R,
) -> Choices<'a> {
    let wanted = num_choices.saturating_sub(1);
    let is_other = |song: &&Song| song.song_id != correct.song_id;

    let mut pool: Vec<&Song> = catalog.filter(filter).into_iter().filter(is_other).collect();
    if pool.len() < wanted {
        let present: HashSet<SongId> = pool.iter().map(|s| s.song_id).collect();
        pool.extend(
            catalog
                .songs()
                .iter()
                .filter(is_other)
                .filter(|s| !present.contains(&s.song_id)),
        );
    }
    pool.shuffle(rng);

    let mut seen_names: HashSet<&str> = HashSet::from([correct.name.as_str()]);
    let mut picked: Vec<&Song> = Vec::with_capacity(num_choices);
    pick_unique_names(&pool, &mut seen_names, &mut picked, wanted);

    if picked.len() < wanted {
        let mut remaining: Vec<&Song> = catalog
            .songs()
            .iter()
            .filter(is_other)
            .filter(|s| !seen_names.contains(s.name.as_str()))
            .collect();
        remaining.shuffle(rng);
        pick_unique_names(&remaining, &mut seen_names, &mut picked, wanted);
    }

    if picked.len() < wanted {
        warn!(
            "Not enough distinct song names for {} choices, some names will repeat",
            num_choices
        );
        let picked_ids: HashSet<SongId> = picked.iter().map(|s| s.song_id).collect();
        let mut fillers: Vec<&Song> = catalog
            .songs()
            .iter()
            .filter(is_other)
            .filter(|s| !picked_ids.contains(&s.song_id))
            .collect();
        fillers.shuffle(rng);
        let missing = wanted - picked.len();
        picked.extend(fillers.into_iter().take(missing));

        if picked.len() < wanted {
            warn!(
                "Catalog has fewer than {} songs, question gets {} choices",
                num_choices,
                picked.len() + 1
            );
        }
    }

    picked.shuffle(rng);
    let correct_index = rng.random_range(0..=picked.len());
    picked.insert(correct_index, correct);
    Choices {
        songs: picked,
        correct_index,
    }
}
