use crate::catalog::store::CatalogError;
use crate::core::condition::ConditionRecord;

/// Parse TSV/CSV text with columns: name, symptoms, specialist, precautions
///
/// Blank lines and `#` comments are skipped, and a leading header row whose
/// first column is `name` or `condition` is ignored. With `,` as delimiter the
/// precautions column absorbs any remaining fields, since precaution text
/// often contains commas.
///
/// # Errors
///
/// Returns `CatalogError::InvalidFormat` if a row has fewer than 4 fields or
/// no conditions are found.
pub fn parse_tsv_text(text: &str, delimiter: char) -> Result<Vec<ConditionRecord>, CatalogError> {
    let mut records = Vec::new();
    let mut first_data_line = true;

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.splitn(4, delimiter).collect();

        if first_data_line {
            first_data_line = false;
            let first = fields.first().map(|s| s.trim().to_lowercase()).unwrap_or_default();
            if first == "name" || first == "condition" {
                continue;
            }
        }

        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;

        if fields.len() < 4 {
            return Err(CatalogError::InvalidFormat(format!(
                "Line {line_num} has fewer than 4 fields"
            )));
        }

        records.push(ConditionRecord::new(
            fields[0].trim(),
            fields[1].trim(),
            fields[2].trim(),
            fields[3].trim(),
        ));
    }

    if records.is_empty() {
        return Err(CatalogError::InvalidFormat(
            "No conditions found in file".to_string(),
        ));
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tsv_text() {
        let tsv = "name\tsymptoms\tspecialist\tprecautions
Diabetes\tfrequent urination thirst fatigue\tEndocrinologist\tAvoid sugar, regular exercise
Flu\tfever cough sore throat\tGeneral Physician\tRest, fluids, paracetamol
";

        let records = parse_tsv_text(tsv, '\t').unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Diabetes");
        assert_eq!(records[1].precautions, "Rest, fluids, paracetamol");
    }

    #[test]
    fn test_parse_csv_keeps_commas_in_precautions() {
        let csv = "condition,symptoms,specialist,precautions
Flu,fever cough sore throat,General Physician,Rest, fluids, paracetamol
";

        let records = parse_tsv_text(csv, ',').unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].precautions, "Rest, fluids, paracetamol");
    }

    #[test]
    fn test_parse_tsv_comments_before_header() {
        let tsv = "# reference table

name\tsymptoms\tspecialist\tprecautions
Asthma\twheezing breathlessness\tPulmonologist\tUse inhaler
";
        let records = parse_tsv_text(tsv, '\t').unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Asthma");
    }

    #[test]
    fn test_parse_tsv_short_row() {
        let tsv = "Flu\tfever cough\n";
        let err = parse_tsv_text(tsv, '\t').unwrap_err();
        assert!(err.to_string().contains("Line 1"));
    }

    #[test]
    fn test_parse_tsv_header_only() {
        let tsv = "name\tsymptoms\tspecialist\tprecautions\n";
        assert!(matches!(
            parse_tsv_text(tsv, '\t'),
            Err(CatalogError::InvalidFormat(_))
        ));
    }
}
