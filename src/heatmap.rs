use crate::participant::ParticipantAvailability;
use crate::slot::Slot;
use log::{debug, trace};
use num::rational::Ratio;
use num::One;
use std::collections::{BTreeSet, HashMap};
use std::ops::Index;

/// Fill shown when everyone can make a slot
pub const FULL_OVERLAP_COLOR: &str = "#4A9060";
/// Fill for the slots of a single highlighted participant
pub const HIGHLIGHT_COLOR: &str = "#C96442";
/// Fill for slots others marked while a participant is highlighted
pub const MUTED_COLOR: &str = "rgba(177, 173, 161, 0.18)";

const MIN_OPACITY: f64 = 0.18;
const OPACITY_SPAN: f64 = 0.70;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeatmapEntry {
    pub count: usize,
    pub total: usize,
    pub participants: Vec<String>,
}

impl HeatmapEntry {
    fn empty(total: usize) -> HeatmapEntry {
        HeatmapEntry {
            count: 0,
            total,
            participants: Vec::new(),
        }
    }

    /// `count / total`, or `None` before anyone responded
    pub fn ratio(&self) -> Option<Ratio<usize>> {
        if self.total == 0 {
            None
        } else {
            Some(Ratio::new(self.count, self.total))
        }
    }

    pub fn is_full(&self) -> bool {
        self.total > 0 && self.count == self.total
    }

    pub fn color(&self) -> HeatmapColor {
        heatmap_color(self.count, self.total)
    }
}

/// Entries keyed by slot, iterated in the order of the universe they were
/// aggregated over. A slot repeated in the universe keeps its first position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Heatmap {
    entries: Vec<(Slot, HeatmapEntry)>,
    index: HashMap<Slot, usize>,
}

impl Heatmap {
    fn seed(universe: &[Slot], total: usize) -> Heatmap {
        let mut heatmap = Heatmap::default();
        for &slot in universe {
            if !heatmap.index.contains_key(&slot) {
                heatmap.index.insert(slot, heatmap.entries.len());
                heatmap.entries.push((slot, HeatmapEntry::empty(total)));
            }
        }
        heatmap
    }

    pub fn get(&self, slot: &Slot) -> Option<&HeatmapEntry> {
        self.index.get(slot).map(|&i| &self.entries[i].1)
    }

    fn get_mut(&mut self, slot: &Slot) -> Option<&mut HeatmapEntry> {
        let i = *self.index.get(slot)?;
        Some(&mut self.entries[i].1)
    }

    pub fn contains_key(&self, slot: &Slot) -> bool {
        self.index.contains_key(slot)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Slot, &HeatmapEntry)> + '_ {
        self.entries.iter().map(|(slot, entry)| (slot, entry))
    }

    pub fn slots(&self) -> impl Iterator<Item = &Slot> + '_ {
        self.entries.iter().map(|(slot, _)| slot)
    }

    pub fn values(&self) -> impl Iterator<Item = &HeatmapEntry> + '_ {
        self.entries.iter().map(|(_, entry)| entry)
    }
}

impl Index<&Slot> for Heatmap {
    type Output = HeatmapEntry;

    /// Panics when `slot` is outside the universe, like map indexing
    fn index(&self, slot: &Slot) -> &HeatmapEntry {
        &self.entries[self.index[slot]].1
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Heatmap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (slot, entry) in &self.entries {
            map.serialize_entry(slot, entry)?;
        }
        map.end()
    }
}

/// Folds participant records over the slot universe, keeping its order.
/// Every entry shares the same `total`, the number of records, so entries
/// compare directly as ratios. Record slots outside `universe` are skipped.
///
/// # Examples
/// ```
/// use overlap_libs::heatmap::{aggregate, best_slots};
/// use overlap_libs::participant::ParticipantAvailability;
/// use overlap_libs::slot::Slot;
///
/// let a: Slot = "2025-01-15 09:00".parse().unwrap();
/// let b: Slot = "2025-01-15 09:30".parse().unwrap();
///
/// let records = vec![
///     ParticipantAvailability::new("Ada", vec![a, b]),
///     ParticipantAvailability::new("Grace", vec![a]),
/// ];
///
/// let heatmap = aggregate(&[a, b], &records);
///
/// assert_eq!(heatmap[&a].count, 2);
/// assert_eq!(heatmap[&b].participants, vec!["Ada".to_string()]);
/// assert_eq!(best_slots(&heatmap, records.len()).into_iter().collect::<Vec<_>>(), vec![a]);
/// ```
pub fn aggregate(universe: &[Slot], records: &[ParticipantAvailability]) -> Heatmap {
    let total = records.len();

    let mut heatmap = Heatmap::seed(universe, total);

    for record in records {
        for slot in record.slots.iter() {
            match heatmap.get_mut(slot) {
                Some(entry) => {
                    entry.count += 1;
                    entry.participants.push(record.name.clone());
                }
                None => trace!("Ignoring {} for {}, outside of the universe", slot, record.name),
            }
        }
    }

    debug!(
        "Aggregated {} records over {} slots",
        total,
        heatmap.len()
    );

    heatmap
}

/// Slots every respondent can make. Empty while nobody responded.
pub fn best_slots(heatmap: &Heatmap, total: usize) -> BTreeSet<Slot> {
    if total == 0 {
        return BTreeSet::new();
    }

    heatmap
        .iter()
        .filter(|(_, entry)| entry.count == total)
        .map(|(&slot, _)| slot)
        .collect()
}

/// Names in `all` not available for the slot of `entry`, in the order of `all`.
/// An empty result means everyone is available.
pub fn missing_participants<'a, I>(entry: &HeatmapEntry, all: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    all.into_iter()
        .filter(|name| !entry.participants.iter().any(|p| p.as_str() == *name))
        .collect()
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum HeatmapColor {
    /// No distinguishing fill
    Blank,
    FullOverlap,
    /// Darker the fewer people are available
    Partial { opacity: f64 },
}

impl HeatmapColor {
    /// CSS fill for the cell, `None` for no fill
    pub fn css(&self) -> Option<String> {
        match self {
            HeatmapColor::Blank => None,
            HeatmapColor::FullOverlap => Some(FULL_OVERLAP_COLOR.to_string()),
            HeatmapColor::Partial { opacity } => Some(format!("rgba(161, 74, 47, {:.2})", opacity)),
        }
    }
}

/// Maps availability to a cell fill.
/// `opacity = 0.18 + (1 - count/total) * 0.70`, within `[0.18, 0.88]`.
///
/// # Examples
/// ```
/// use overlap_libs::heatmap::{heatmap_color, HeatmapColor};
///
/// assert_eq!(heatmap_color(0, 4), HeatmapColor::Blank);
/// assert_eq!(heatmap_color(4, 4), HeatmapColor::FullOverlap);
/// assert_eq!(heatmap_color(1, 2).css().unwrap(), "rgba(161, 74, 47, 0.53)");
/// ```
pub fn heatmap_color(count: usize, total: usize) -> HeatmapColor {
    if total == 0 || count == 0 {
        return HeatmapColor::Blank;
    }

    let ratio = Ratio::new(count.min(total), total);
    if ratio.is_one() {
        return HeatmapColor::FullOverlap;
    }

    let available = *ratio.numer() as f64 / *ratio.denom() as f64;
    HeatmapColor::Partial {
        opacity: MIN_OPACITY + (1.0 - available) * OPACITY_SPAN,
    }
}

/// Cell fill of the results grid, optionally focused on one participant
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum CellShade {
    Blank,
    /// The focused participant marked this slot
    Highlighted,
    /// Someone other than the focused participant marked this slot
    Muted,
    Heat(HeatmapColor),
}

impl CellShade {
    pub fn css(&self) -> Option<String> {
        match self {
            CellShade::Blank => None,
            CellShade::Highlighted => Some(HIGHLIGHT_COLOR.to_string()),
            CellShade::Muted => Some(MUTED_COLOR.to_string()),
            CellShade::Heat(color) => color.css(),
        }
    }
}

pub fn cell_shade(
    slot: &Slot,
    entry: Option<&HeatmapEntry>,
    focus: Option<&ParticipantAvailability>,
) -> CellShade {
    let count = entry.map_or(0, |e| e.count);

    match (focus, entry) {
        (Some(record), _) if record.is_available(slot) => CellShade::Highlighted,
        (Some(_), _) if count > 0 => CellShade::Muted,
        (Some(_), _) | (None, None) => CellShade::Blank,
        (None, Some(entry)) => match entry.color() {
            HeatmapColor::Blank => CellShade::Blank,
            color => CellShade::Heat(color),
        },
    }
}
