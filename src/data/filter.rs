use super::model::RecordTable;

// ---------------------------------------------------------------------------
// Row filter policy shared by the filtering transforms
// ---------------------------------------------------------------------------

/// Return indices of rows whose parse succeeded.
pub fn kept_indices<T>(parsed: &[Option<T>]) -> Vec<usize> {
    parsed
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_some())
        .map(|(i, _)| i)
        .collect()
}

/// Drop every row whose parse failed, then hand back the filtered table and
/// the parsed values of the surviving rows, aligned with its new positions.
///
/// `parsed` must hold exactly one entry per row of `table`, computed over the
/// untouched table. The filtered table is materialised before any derived
/// column is built, so the returned values can only ever be zipped against
/// post-removal positions.
pub fn retain_parsed<T>(
    table: RecordTable,
    stage: &str,
    parsed: Vec<Option<T>>,
) -> (RecordTable, Vec<T>) {
    debug_assert_eq!(table.len(), parsed.len());

    let before = table.len();
    let keep = kept_indices(&parsed);

    if keep.len() == before {
        return (table, parsed.into_iter().flatten().collect());
    }

    for (id, _) in table
        .ids()
        .iter()
        .zip(parsed.iter())
        .filter(|(_, p)| p.is_none())
    {
        log::debug!("{stage}: dropping row `{id}`");
    }

    let filtered = table.take_rows(&keep);
    let values: Vec<T> = parsed.into_iter().flatten().collect();

    log::info!(
        "{stage}: kept {} of {before} rows ({} dropped)",
        filtered.len(),
        before - filtered.len()
    );
    if filtered.is_empty() {
        log::warn!("{stage}: no rows left after filtering");
    }

    (filtered, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn table(n: usize) -> RecordTable {
        let ids: Vec<String> = (0..n).map(|i| format!("r{i}")).collect();
        let mut t = RecordTable::new(ids);
        t.push_column(
            "raw",
            (0..n).map(|i| CellValue::Integer(i as i64)).collect(),
        )
        .unwrap();
        t
    }

    #[test]
    fn keeps_everything_when_all_parse() {
        let (t, values) = retain_parsed(table(3), "test", vec![Some(1), Some(2), Some(3)]);
        assert_eq!(t.len(), 3);
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn values_align_with_surviving_rows() {
        let parsed = vec![Some("a"), None, None, Some("d"), Some("e")];
        let (t, values) = retain_parsed(table(5), "test", parsed);
        assert_eq!(t.ids(), &["r0".to_string(), "r3".to_string(), "r4".to_string()]);
        assert_eq!(values, vec!["a", "d", "e"]);
        let raw = &t.column("test", "raw").unwrap().values;
        assert_eq!(
            raw,
            &vec![CellValue::Integer(0), CellValue::Integer(3), CellValue::Integer(4)]
        );
    }

    #[test]
    fn can_drop_every_row() {
        let (t, values) = retain_parsed::<u8>(table(2), "test", vec![None, None]);
        assert!(t.is_empty());
        assert!(values.is_empty());
        assert_eq!(t.column_names(), vec!["raw"]);
    }
}
