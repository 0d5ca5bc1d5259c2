//! Column layout for overlapping blocks within one room

use crate::models::TimeRange;

use super::LayoutEntity;

/// Assign columns to one room's blocks by greedy first fit.
///
/// Blocks must arrive sorted by start time. Each takes the lowest column
/// whose previous occupant has already ended, opening a new column when
/// none has; afterwards every block learns the total number of columns so
/// widths divide evenly. With start-sorted input the greedy choice uses as
/// few columns as any assignment can.
pub fn assign_columns(entities: &mut [LayoutEntity]) {
    let mut last_in_column: Vec<TimeRange> = Vec::new();

    for entity in &mut *entities {
        let range = entity.time_range();
        // Checking the latest occupant is enough: with start-sorted input
        // every earlier occupant of the column ends before it.
        let open = last_in_column
            .iter()
            .position(|occupied| !occupied.overlaps(range));
        match open {
            Some(index) => {
                last_in_column[index] = range;
                entity.column_index = index;
            }
            None => {
                last_in_column.push(range);
                entity.column_index = last_in_column.len() - 1;
            }
        }
    }

    let count = last_in_column.len().max(1);
    for entity in &mut *entities {
        entity.column_count = count;
    }
}
