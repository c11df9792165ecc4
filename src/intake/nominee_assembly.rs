//! Group nominee assembly.
//!
//! Walks the mid-document fields once per slot of the layout, binding each
//! slot's name, monetary and hours fields into a [`NomineeRecord`], and
//! cross-checks the number of name fields seen anywhere against the number
//! of records produced. A gap between the two means a slot layout no longer
//! matches the form and nominees would silently go missing.

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{FieldMap, NomineeRecord};

use super::{NomineeSlot, canonical_name, is_reused_slot, parse_amount};

/// Key fragment identifying nominee name fields on the middle pages.
pub const NAME_FIELD_FRAGMENT: &str = "employee_name";

/// Assembles group nominees from the middle pages.
///
/// Slots whose name field is empty are dropped. A named slot with both
/// amounts zero is an anomaly, except for the reused slots of the 21-slot
/// layout, which are skipped silently.
///
/// # Errors
///
/// Checked in this order:
/// - `NoNomineesDetected` if no name field is populated at all
/// - `NoNomineesProcessed` if no slot produced a record
/// - `NomineeCountMismatch` if more names were detected than processed
/// - `ZeroAmountNominee` listing every anomaly
///
/// `InvalidAmount` is returned as soon as a slot's amount field holds no number.
pub fn assemble_nominees(slots: &[NomineeSlot], mid_pages: &FieldMap) -> EngineResult<Vec<NomineeRecord>> {
    let mut detected: Vec<(&str, &str)> = Vec::new();
    let mut processed: Vec<NomineeRecord> = Vec::new();
    let mut anomalies: Vec<String> = Vec::new();

    for (index, slot) in slots.iter().enumerate() {
        let mut name: Option<String> = None;
        let mut monetary_amount = Decimal::ZERO;
        let mut time_off_hours = Decimal::ZERO;

        for (key, value) in mid_pages.iter() {
            if key.contains(NAME_FIELD_FRAGMENT) && !detected.contains(&(key, value)) {
                detected.push((key, value));
            }
            if name.is_none() && key == slot.name_key {
                name = Some(canonical_name(value));
            }
            if key == slot.money_key {
                monetary_amount = parse_amount(key, value)?;
            }
            if key == slot.hours_key {
                time_off_hours = parse_amount(key, value)?;
            }
        }

        let Some(name) = name else {
            continue;
        };

        let nominee = NomineeRecord::new(name, monetary_amount, time_off_hours);
        if !nominee.has_amount() {
            if is_reused_slot(slots.len(), index) {
                debug!(slot = index, name = %nominee.name, "Skipping empty reused slot");
                continue;
            }
            anomalies.push(nominee.summary());
        }
        processed.push(nominee);
    }

    debug!(
        detected = detected.len(),
        processed = processed.len(),
        anomalies = anomalies.len(),
        "Nominee slots assembled"
    );

    if detected.is_empty() {
        return Err(EngineError::NoNomineesDetected);
    }
    if processed.is_empty() {
        return Err(EngineError::NoNomineesProcessed);
    }
    if detected.len() > processed.len() {
        return Err(EngineError::NomineeCountMismatch {
            detected: detected
                .iter()
                .map(|(key, value)| format!("{}: {}", key, value))
                .collect(),
            processed: processed.iter().map(NomineeRecord::summary).collect(),
        });
    }
    if !anomalies.is_empty() {
        return Err(EngineError::ZeroAmountNominee { anomalies });
    }

    Ok(processed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::{SEVEN_SLOT_LAYOUT, TWENTY_ONE_SLOT_LAYOUT, nominee_slots};

    const FIRST_NAMES: [&str; 7] = ["Ann", "Bo", "Cy", "Di", "Ed", "Flo", "Gus"];

    fn populate(fields: &mut FieldMap, slot: &NomineeSlot, first: &str, money: u32, hours: u32) {
        fields.insert(slot.name_key, format!("{} Tester", first));
        fields.insert(slot.money_key, money.to_string());
        fields.insert(slot.hours_key, hours.to_string());
    }

    #[test]
    fn test_seven_slots_round_trip_in_order() {
        let mut mid = FieldMap::new();
        // Insert in reverse to show output follows slot order, not field order.
        for (i, slot) in SEVEN_SLOT_LAYOUT.iter().enumerate().rev() {
            populate(&mut mid, slot, FIRST_NAMES[i], 100 + i as u32, i as u32 + 1);
        }

        let nominees = assemble_nominees(nominee_slots(3), &mid).unwrap();
        assert_eq!(nominees.len(), 7);
        for (i, nominee) in nominees.iter().enumerate() {
            assert_eq!(nominee.name, format!("Tester, {}", FIRST_NAMES[i]));
            assert_eq!(nominee.monetary_amount, Decimal::from(100 + i as u32));
            assert_eq!(nominee.time_off_hours, Decimal::from(i as u32 + 1));
        }
    }

    #[test]
    fn test_unpopulated_slots_are_dropped() {
        let mut mid = FieldMap::new();
        populate(&mut mid, &SEVEN_SLOT_LAYOUT[0], "Ann", 100, 0);
        populate(&mut mid, &SEVEN_SLOT_LAYOUT[4], "Ed", 0, 8);

        let nominees = assemble_nominees(&SEVEN_SLOT_LAYOUT, &mid).unwrap();
        let names: Vec<&str> = nominees.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Tester, Ann", "Tester, Ed"]);
    }

    #[test]
    fn test_no_name_fields_is_not_detected() {
        let mut mid = FieldMap::new();
        mid.insert("award_amount", "100");
        assert!(matches!(
            assemble_nominees(&SEVEN_SLOT_LAYOUT, &mid),
            Err(EngineError::NoNomineesDetected)
        ));
    }

    #[test]
    fn test_names_outside_layout_are_not_processed() {
        let mut mid = FieldMap::new();
        mid.insert("employee_name_40", "Ann Tester");
        assert!(matches!(
            assemble_nominees(&SEVEN_SLOT_LAYOUT, &mid),
            Err(EngineError::NoNomineesProcessed)
        ));
    }

    #[test]
    fn test_detected_names_beyond_layout_is_a_mismatch() {
        let mut mid = FieldMap::new();
        populate(&mut mid, &SEVEN_SLOT_LAYOUT[0], "Ann", 100, 0);
        mid.insert("employee_name_9", "Bo Tester");

        match assemble_nominees(&SEVEN_SLOT_LAYOUT, &mid) {
            Err(EngineError::NomineeCountMismatch { detected, processed }) => {
                assert_eq!(detected.len(), 2);
                assert!(detected.contains(&"employee_name_9: Bo Tester".to_string()));
                assert_eq!(processed.len(), 1);
            }
            other => panic!("Expected NomineeCountMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_amount_slot_lists_every_anomaly() {
        let mut mid = FieldMap::new();
        populate(&mut mid, &SEVEN_SLOT_LAYOUT[0], "Ann", 0, 0);
        populate(&mut mid, &SEVEN_SLOT_LAYOUT[1], "Bo", 50, 0);
        populate(&mut mid, &SEVEN_SLOT_LAYOUT[2], "Cy", 0, 0);

        match assemble_nominees(&SEVEN_SLOT_LAYOUT, &mid) {
            Err(EngineError::ZeroAmountNominee { anomalies }) => {
                assert_eq!(anomalies.len(), 2);
                assert!(anomalies[0].contains("Tester, Ann"));
                assert!(anomalies[1].contains("Tester, Cy"));
            }
            other => panic!("Expected ZeroAmountNominee, got {:?}", other),
        }
    }

    #[test]
    fn test_reused_slot_with_zero_amount_is_skipped() {
        let mut mid = FieldMap::new();
        populate(&mut mid, &TWENTY_ONE_SLOT_LAYOUT[0], "Ann", 100, 0);
        // Slot 13 reads award_amount_14 and slot 14 reads award_amount_15 for the
        // same name field; only the first is filled in.
        populate(&mut mid, &TWENTY_ONE_SLOT_LAYOUT[13], "Bo", 200, 0);

        let nominees = assemble_nominees(nominee_slots(5), &mid).unwrap();
        let names: Vec<&str> = nominees.iter().map(|n| n.name.as_str()).collect();
        // Slot 20 repeats the keys of slot 13, so Bo is read a second time.
        assert_eq!(names, vec!["Tester, Ann", "Tester, Bo", "Tester, Bo"]);
    }

    #[test]
    fn test_tail_slots_reread_fourteen_slot_fields() {
        let mut mid = FieldMap::new();
        populate(&mut mid, &TWENTY_ONE_SLOT_LAYOUT[0], "Ann", 100, 0);
        mid.insert("employee_name_12", "Cy Tester");
        mid.insert("award_amount_11", "300");
        mid.insert("time_off_hours_11", "2");

        let nominees = assemble_nominees(nominee_slots(5), &mid).unwrap();
        assert_eq!(nominees.len(), 3);
        assert_eq!(nominees[1], nominees[2]);
        assert_eq!(nominees[2].name, "Tester, Cy");
        assert_eq!(nominees[2].monetary_amount, Decimal::from(300));
        assert_eq!(nominees[2].time_off_hours, Decimal::from(2));
    }

    #[test]
    fn test_repeat_of_empty_reused_slot_is_skipped() {
        let mut mid = FieldMap::new();
        populate(&mut mid, &TWENTY_ONE_SLOT_LAYOUT[0], "Ann", 100, 0);
        populate(&mut mid, &TWENTY_ONE_SLOT_LAYOUT[14], "Bo", 150, 0);

        // Slots 13 and 20 see Bo with no amount; only slot 14 counts.
        let nominees = assemble_nominees(nominee_slots(5), &mid).unwrap();
        let names: Vec<&str> = nominees.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Tester, Ann", "Tester, Bo"]);
    }

    #[test]
    fn test_both_reused_slots_zero_is_skipped_then_mismatch() {
        let mut mid = FieldMap::new();
        populate(&mut mid, &TWENTY_ONE_SLOT_LAYOUT[0], "Ann", 100, 0);
        mid.insert("employee_name_15", "Bo Tester");

        assert!(matches!(
            assemble_nominees(nominee_slots(5), &mid),
            Err(EngineError::NomineeCountMismatch { .. })
        ));
    }

    #[test]
    fn test_zero_amount_outside_reused_slots_is_anomaly_in_twenty_one_layout() {
        let mut mid = FieldMap::new();
        populate(&mut mid, &TWENTY_ONE_SLOT_LAYOUT[0], "Ann", 100, 0);
        populate(&mut mid, &TWENTY_ONE_SLOT_LAYOUT[12], "Bo", 0, 0);

        assert!(matches!(
            assemble_nominees(nominee_slots(5), &mid),
            Err(EngineError::ZeroAmountNominee { .. })
        ));
    }

    #[test]
    fn test_same_slot_index_in_fourteen_layout_is_anomaly() {
        let layout = nominee_slots(4);
        let mut mid = FieldMap::new();
        populate(&mut mid, &layout[0], "Ann", 100, 0);
        populate(&mut mid, &layout[13], "Bo", 0, 0);

        assert!(matches!(
            assemble_nominees(layout, &mid),
            Err(EngineError::ZeroAmountNominee { .. })
        ));
    }
}
