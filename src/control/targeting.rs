use crate::constants::ORBIT_COUNT;
use crate::control::debris::{Debris, Orbit};

/// Picks the orbit holding the most uncollected debris, skipping `exclude`.
///
/// Counts are scanned in ascending orbit index and only a strictly larger
/// count replaces the running best, so ties go to the lowest-numbered orbit.
pub fn select_target(debris: &[Debris], exclude: Option<Orbit>) -> Option<Orbit> {
    let mut remaining = debris
        .iter()
        .filter(|d| d.is_in_orbit() && Some(d.orbit()) != exclude)
        .peekable();
    let first = remaining.peek().map(|d| d.orbit())?;

    let mut counts = [0usize; ORBIT_COUNT];
    for d in remaining {
        counts[d.orbit().index()] += 1;
    }

    let mut best = None;
    let mut max_debris = 0;
    for (index, &count) in counts.iter().enumerate() {
        if count > max_debris {
            max_debris = count;
            best = Orbit::from_index(index);
        }
    }

    best.or(Some(first))
}
