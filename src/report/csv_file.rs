use anyhow::{Context, anyhow};

use super::ReportRow;

/// Header comes from `ReportRow`'s field order.
pub fn render(rows: &[ReportRow]) -> anyhow::Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for row in rows {
        writer.serialize(row).context("serialize csv row")?;
    }

    writer
        .into_inner()
        .map_err(|e| anyhow!("flush csv: {}", e.error()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(sn: usize, name: &str) -> ReportRow {
        ReportRow {
            sn,
            name: name.into(),
            email: "a@x.com".into(),
            phone: "555".into(),
            department: "Eng".into(),
            date: "2026-03-09".into(),
            time: "09:00:00 AM".into(),
        }
    }

    #[test]
    fn quotes_fields_with_commas() {
        let out = render(&[row(1, "Doe, Ann")]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();

        assert_eq!(lines.next(), Some("sn,name,email,phone,department,date,time"));
        assert_eq!(
            lines.next(),
            Some("1,\"Doe, Ann\",a@x.com,555,Eng,2026-03-09,09:00:00 AM")
        );
        assert_eq!(lines.next(), None);
    }
}
