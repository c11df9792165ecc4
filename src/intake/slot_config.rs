//! Nominee slot layouts of the group forms.
//!
//! Each group form length carries a fixed number of nominee rows. A row is
//! a [`NomineeSlot`]: the keys of its name, monetary and hours fields. The
//! layouts are spelled out in full so they can be checked independently
//! of the assembler.
//!
//! The five-page form template reuses some field suffixes: slots 13 and 14
//! both read `employee_name_15`, slot 16 reads the `_10` amount and hours
//! fields of slot 9, and slots 17 to 20 repeat the rows of slots 10 to 13.
//! A filled `employee_name_12` to `_15` is therefore read twice on a
//! five-page form.

/// The field keys of one nominee row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NomineeSlot {
    /// Key of the nominee name field.
    pub name_key: &'static str,
    /// Key of the monetary amount field.
    pub money_key: &'static str,
    /// Key of the time-off hours field.
    pub hours_key: &'static str,
}

const fn slot(name_key: &'static str, money_key: &'static str, hours_key: &'static str) -> NomineeSlot {
    NomineeSlot {
        name_key,
        money_key,
        hours_key,
    }
}

/// Zero-based slots of the 21-slot layout that share a name field and are
/// expected to come up empty.
pub const REUSED_SLOT_INDICES: [usize; 2] = [13, 14];

/// Layout of the three-page group form.
pub const SEVEN_SLOT_LAYOUT: [NomineeSlot; 7] = [
    slot("employee_name_2", "award_amount", "time_off_hours"),
    slot("employee_name_3", "award_amount_2", "time_off_hours_2"),
    slot("employee_name_4", "award_amount_3", "time_off_hours_3"),
    slot("employee_name_5", "award_amount_4", "time_off_hours_4"),
    slot("employee_name_6", "award_amount_5", "time_off_hours_5"),
    slot("employee_name_7", "award_amount_6", "time_off_hours_6"),
    slot("employee_name_8", "award_amount_7", "time_off_hours_7"),
];

/// Layout of the four-page group form.
pub const FOURTEEN_SLOT_LAYOUT: [NomineeSlot; 14] = [
    slot("employee_name_2", "award_amount", "time_off_hours"),
    slot("employee_name_3", "award_amount_2", "time_off_hours_2"),
    slot("employee_name_4", "award_amount_3", "time_off_hours_3"),
    slot("employee_name_5", "award_amount_4", "time_off_hours_4"),
    slot("employee_name_6", "award_amount_5", "time_off_hours_5"),
    slot("employee_name_7", "award_amount_6", "time_off_hours_6"),
    slot("employee_name_8", "award_amount_7", "time_off_hours_7"),
    slot("employee_name_9", "award_amount_8", "time_off_hours_8"),
    slot("employee_name_10", "award_amount_9", "time_off_hours_9"),
    slot("employee_name_11", "award_amount_10", "time_off_hours_10"),
    slot("employee_name_12", "award_amount_11", "time_off_hours_11"),
    slot("employee_name_13", "award_amount_12", "time_off_hours_12"),
    slot("employee_name_14", "award_amount_13", "time_off_hours_13"),
    slot("employee_name_15", "award_amount_14", "time_off_hours_14"),
];

/// Layout of the five-page group form.
pub const TWENTY_ONE_SLOT_LAYOUT: [NomineeSlot; 21] = [
    slot("employee_name_1", "award_amount", "time_off_hours"),
    slot("employee_name_3", "award_amount_2", "time_off_hours_2"),
    slot("employee_name_4", "award_amount_3", "time_off_hours_3"),
    slot("employee_name_5", "award_amount_4", "time_off_hours_4"),
    slot("employee_name_6", "award_amount_5", "time_off_hours_5"),
    slot("employee_name_7", "award_amount_6", "time_off_hours_6"),
    slot("employee_name_8", "award_amount_7", "time_off_hours_7"),
    slot("employee_name_9", "award_amount_8", "time_off_hours_8"),
    slot("employee_name_10", "award_amount_9", "time_off_hours_9"),
    slot("employee_name_11", "award_amount_10", "time_off_hours_10"),
    slot("employee_name_12", "award_amount_11", "time_off_hours_11"),
    slot("employee_name_13", "award_amount_12", "time_off_hours_12"),
    slot("employee_name_14", "award_amount_13", "time_off_hours_13"),
    slot("employee_name_15", "award_amount_14", "time_off_hours_14"),
    slot("employee_name_15", "award_amount_15", "time_off_hours_15"),
    slot("employee_name_16", "award_amount_16", "time_off_hours_16"),
    slot("employee_name_17", "award_amount_10", "time_off_hours_10"),
    slot("employee_name_12", "award_amount_11", "time_off_hours_11"),
    slot("employee_name_13", "award_amount_12", "time_off_hours_12"),
    slot("employee_name_14", "award_amount_13", "time_off_hours_13"),
    slot("employee_name_15", "award_amount_14", "time_off_hours_14"),
];

/// Returns the nominee slot layout for a group form of `page_count` pages.
///
/// Any page count other than 3, 4 or 5 yields an empty layout.
///
/// # Example
///
/// ```
/// use award_intake::intake::nominee_slots;
///
/// assert_eq!(nominee_slots(3).len(), 7);
/// assert_eq!(nominee_slots(5)[0].name_key, "employee_name_1");
/// assert!(nominee_slots(2).is_empty());
/// ```
pub fn nominee_slots(page_count: usize) -> &'static [NomineeSlot] {
    match page_count {
        3 => &SEVEN_SLOT_LAYOUT,
        4 => &FOURTEEN_SLOT_LAYOUT,
        5 => &TWENTY_ONE_SLOT_LAYOUT,
        _ => &[],
    }
}

/// Returns true if `index` is one of the reused slots of the 21-slot layout,
/// or a later slot repeating the same field keys.
pub fn is_reused_slot(layout_len: usize, index: usize) -> bool {
    if layout_len != TWENTY_ONE_SLOT_LAYOUT.len() {
        return false;
    }
    TWENTY_ONE_SLOT_LAYOUT.get(index).is_some_and(|candidate| {
        REUSED_SLOT_INDICES
            .iter()
            .any(|&reused| TWENTY_ONE_SLOT_LAYOUT[reused] == *candidate)
    })
}
