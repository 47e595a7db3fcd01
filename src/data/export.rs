use super::error::{DataError, Result};
use super::filter::FilteredView;
use super::model::{Dataset, Record, SALARY_IN_USD, WORK_YEAR};

/// File name suggested for downloads of the filtered extract.
pub const EXPORT_FILE_NAME: &str = "filtered_ds_jobs.csv";

/// Cells of `record` aligned with the dataset header, with `work_year` and
/// `salary_in_usd` replaced by their normalized values.
pub fn normalized_cells(dataset: &Dataset, record: &Record) -> Vec<String> {
    let mut cells = record.cells.clone();
    cells.resize(dataset.headers.len(), String::new());
    if let Some(i) = dataset.column_index(WORK_YEAR) {
        cells[i] = record.work_year.to_string();
    }
    if let Some(i) = dataset.column_index(SALARY_IN_USD) {
        cells[i] = record.salary_in_usd.to_string();
    }
    cells
}

/// Serialize the rows of a view back to CSV with the original header.
///
/// `work_year` and `salary_in_usd` are written in their normalized form;
/// every other column is written exactly as it was read.
pub fn export_csv(view: &FilteredView<'_>) -> Result<Vec<u8>> {
    let dataset = view.dataset();
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&dataset.headers)?;

    for record in view.iter() {
        writer.write_record(normalized_cells(dataset, record))?;
    }

    writer
        .into_inner()
        .map_err(|e| DataError::Export(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{apply_filter, FilterCriteria};
    use crate::data::loader::read_csv;
    use crate::data::normalize::normalize;

    const SOURCE: &str = "\
work_year,experience_level,employment_type,job_title,salary_in_usd,remote_ratio,company_location
2021e,EN,FT,Data Analyst,50000,100,US
2022,SE,FT,\"Data Scientist, Lead\",150000.0,0,GB
unknown,MI,PT,ML Engineer,90000,50,DE
2021,SE,CT,Data Engineer,120000,50,US
";

    #[test]
    fn export_round_trips_filtered_rows() -> anyhow::Result<()> {
        let ds = normalize(read_csv(SOURCE.as_bytes())?)?;
        let view = apply_filter(&ds, &FilterCriteria::from_options("All", "Senior", "All"));
        let bytes = export_csv(&view)?;

        let reparsed = normalize(read_csv(bytes.as_slice())?)?;
        assert_eq!(reparsed.headers, ds.headers);
        assert_eq!(reparsed.len(), 2);
        for (orig, back) in view.iter().zip(&reparsed.records) {
            assert_eq!(orig.work_year, back.work_year);
            assert_eq!(orig.salary_in_usd, back.salary_in_usd);
            assert_eq!(orig.experience, back.experience);
            assert_eq!(orig.remote, back.remote);
            assert_eq!(orig.job_title, back.job_title);
            assert_eq!(orig.company_location, back.company_location);
        }
        let employment = reparsed.column_index("employment_type").unwrap();
        assert_eq!(reparsed.records[1].cells[employment], "CT");
        Ok(())
    }

    #[test]
    fn export_writes_normalized_year_and_salary() -> anyhow::Result<()> {
        let ds = normalize(read_csv(SOURCE.as_bytes())?)?;
        let view = apply_filter(&ds, &FilterCriteria::from_options("2021", "Entry", "All"));
        let text = String::from_utf8(export_csv(&view)?)?;

        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("work_year,experience_level,employment_type,job_title,salary_in_usd,remote_ratio,company_location")
        );
        assert_eq!(lines.next(), Some("2021,EN,FT,Data Analyst,50000,100,US"));
        assert_eq!(lines.next(), None);
        Ok(())
    }

    #[test]
    fn empty_view_exports_header_only() -> anyhow::Result<()> {
        let ds = normalize(read_csv(SOURCE.as_bytes())?)?;
        let view = apply_filter(&ds, &FilterCriteria::from_options("1999", "All", "All"));
        let text = String::from_utf8(export_csv(&view)?)?;
        assert_eq!(text.lines().count(), 1);
        Ok(())
    }
}
