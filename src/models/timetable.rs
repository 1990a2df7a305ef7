//! Timetable slots and the fixed weekly block grid.
//!
//! The school day is divided into eight fixed blocks over a five-day week.
//! A slot occupies every block whose interval it overlaps, so a class that
//! spans a block boundary shows up in each of the blocks it touches.

use serde::{Deserialize, Serialize};

/// A scheduled class as served by the backend. Times come as `HH:MM:SS`
/// (or `HH:MM`) strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableSlot {
    pub id: u64,
    pub course_id: u64,
    pub subject_id: u64,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
}

/// School days, Monday through Friday.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum SchoolDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

pub const SCHOOL_DAYS: [SchoolDay; 5] = [
    SchoolDay::Monday,
    SchoolDay::Tuesday,
    SchoolDay::Wednesday,
    SchoolDay::Thursday,
    SchoolDay::Friday,
];

impl SchoolDay {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Monday" => Some(SchoolDay::Monday),
            "Tuesday" => Some(SchoolDay::Tuesday),
            "Wednesday" => Some(SchoolDay::Wednesday),
            "Thursday" => Some(SchoolDay::Thursday),
            "Friday" => Some(SchoolDay::Friday),
            _ => None,
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// One fixed block of the school day, in minutes since midnight.
#[derive(Debug, Clone, Copy)]
pub struct TimeBlock {
    pub number: u8,
    pub start: u16,
    pub end: u16,
}

const fn minutes(hour: u16, minute: u16) -> u16 {
    hour * 60 + minute
}

/// The eight daily blocks: 07:20-08:00, 08:00-08:40, 08:50-09:30,
/// 09:30-10:10, 10:25-11:00, 11:00-11:40, 11:50-12:30, 12:30-13:00.
pub const TIME_BLOCKS: [TimeBlock; 8] = [
    TimeBlock { number: 1, start: minutes(7, 20), end: minutes(8, 0) },
    TimeBlock { number: 2, start: minutes(8, 0), end: minutes(8, 40) },
    TimeBlock { number: 3, start: minutes(8, 50), end: minutes(9, 30) },
    TimeBlock { number: 4, start: minutes(9, 30), end: minutes(10, 10) },
    TimeBlock { number: 5, start: minutes(10, 25), end: minutes(11, 0) },
    TimeBlock { number: 6, start: minutes(11, 0), end: minutes(11, 40) },
    TimeBlock { number: 7, start: minutes(11, 50), end: minutes(12, 30) },
    TimeBlock { number: 8, start: minutes(12, 30), end: minutes(13, 0) },
];

/// Parse `HH:MM` or `HH:MM:SS` into minutes since midnight.
pub fn parse_minutes(time: &str) -> Option<u16> {
    let mut parts = time.split(':');
    let hours: u16 = parts.next()?.parse().ok()?;
    let mins: u16 = parts.next()?.parse().ok()?;
    if hours > 23 || mins > 59 {
        return None;
    }
    Some(hours * 60 + mins)
}

/// Indices into [`TIME_BLOCKS`] that the interval `[start, end)` overlaps.
pub fn overlapping_blocks(start: u16, end: u16) -> Vec<usize> {
    TIME_BLOCKS
        .iter()
        .enumerate()
        .filter(|(_, block)| start < block.end && end > block.start)
        .map(|(i, _)| i)
        .collect()
}

/// The weekly grid: `cells[block][day]` holds the slots placed there.
/// Slots with an unknown day or unparseable times place nothing.
#[derive(Debug, Default)]
pub struct TimetableGrid<'a> {
    pub cells: Vec<Vec<Vec<&'a TimetableSlot>>>,
}

impl<'a> TimetableGrid<'a> {
    pub fn place(slots: &'a [TimetableSlot]) -> Self {
        let mut cells =
            vec![vec![Vec::new(); SCHOOL_DAYS.len()]; TIME_BLOCKS.len()];

        for slot in slots {
            let Some(day) = SchoolDay::from_name(&slot.day) else {
                continue;
            };
            let (Some(start), Some(end)) = (
                parse_minutes(&slot.start_time),
                parse_minutes(&slot.end_time),
            ) else {
                continue;
            };
            for block in overlapping_blocks(start, end) {
                cells[block][day.index()].push(slot);
            }
        }

        Self { cells }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(day: &str, start: &str, end: &str) -> TimetableSlot {
        TimetableSlot {
            id: 1,
            course_id: 5,
            subject_id: 9,
            day: day.into(),
            start_time: start.into(),
            end_time: end.into(),
        }
    }

    #[test]
    fn test_parse_minutes() {
        assert_eq!(parse_minutes("07:20"), Some(440));
        assert_eq!(parse_minutes("12:30:00"), Some(750));
        assert_eq!(parse_minutes("25:00"), None);
        assert_eq!(parse_minutes("noon"), None);
    }

    #[test]
    fn test_slot_lands_in_overlapped_block() {
        let slots = [slot("Monday", "07:20:00", "08:00:00")];
        let grid = TimetableGrid::place(&slots);
        assert_eq!(grid.cells[0][0].len(), 1);
        assert!(grid.cells[1][0].is_empty());
    }

    #[test]
    fn test_boundary_spanning_slot_lands_in_every_block() {
        // 07:30-09:00 crosses blocks 1, 2 and 3.
        let slots = [slot("Wednesday", "07:30:00", "09:00:00")];
        let grid = TimetableGrid::place(&slots);
        let wednesday = SchoolDay::Wednesday.index();
        assert_eq!(grid.cells[0][wednesday].len(), 1);
        assert_eq!(grid.cells[1][wednesday].len(), 1);
        assert_eq!(grid.cells[2][wednesday].len(), 1);
        assert!(grid.cells[3][wednesday].is_empty());
    }

    #[test]
    fn test_touching_boundary_does_not_overlap() {
        // Ends exactly where block 2 starts: block 1 only.
        let slots = [slot("Friday", "07:20:00", "08:00:00")];
        let grid = TimetableGrid::place(&slots);
        let friday = SchoolDay::Friday.index();
        assert_eq!(grid.cells[0][friday].len(), 1);
        assert!(grid.cells[1][friday].is_empty());
    }

    #[test]
    fn test_unknown_day_places_nothing() {
        let slots = [slot("Saturday", "07:20:00", "08:00:00")];
        let grid = TimetableGrid::place(&slots);
        assert!(grid.cells.iter().flatten().all(|cell| cell.is_empty()));
    }
}
