// src/io/reporting.rs

use crate::error::Result;
use crate::model::trajectory::Trajectory;
use crate::simulation::engine::DayRecord;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Serialize)]
struct ProfitRow {
    replication: usize,
    profit: f64,
}

/// Writes a trajectory as `time,state_0,state_1,...` rows.
pub fn write_trajectory_csv<W: Write>(writer: W, trajectory: &Trajectory) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["time".to_string()];
    header.extend((0..trajectory.num_states()).map(|i| format!("state_{i}")));
    wtr.write_record(&header)?;

    for point in trajectory.points() {
        let mut row = Vec::with_capacity(point.probabilities.len() + 1);
        row.push(point.time.to_string());
        row.extend(point.probabilities.iter().map(f64::to_string));
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn write_profits_csv<W: Write>(writer: W, profits: &[f64]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for (replication, &profit) in profits.iter().enumerate() {
        wtr.serialize(ProfitRow {
            replication,
            profit,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_history_csv<W: Write>(writer: W, history: &[DayRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in history {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Creates (or truncates) `path` and hands it to one of the writers above.
pub fn to_file<P, F>(path: P, rows: usize, write: F) -> Result<()>
where
    P: AsRef<Path>,
    F: FnOnce(std::fs::File) -> Result<()>,
{
    let path = path.as_ref();
    write(std::fs::File::create(path)?)?;
    tracing::info!(rows, path = %path.display(), "exported csv");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::trajectory::TrajectoryBuilder;
    use nalgebra::RowDVector;

    #[test]
    fn trajectory_csv_layout() {
        let mut builder = TrajectoryBuilder::new(0.5, &RowDVector::from_vec(vec![1.0, 0.0]), 2);
        builder.push(&RowDVector::from_vec(vec![0.75, 0.25]));
        let mut out = Vec::new();
        write_trajectory_csv(&mut out, &builder.finish()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "time,state_0,state_1\n0,1,0\n0.5,0.75,0.25\n");
    }

    #[test]
    fn profits_csv_layout() {
        let mut out = Vec::new();
        write_profits_csv(&mut out, &[12.5, -3.0]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "replication,profit\n0,12.5\n1,-3.0\n");
    }

    #[test]
    fn history_csv_has_header_and_rows() {
        let record = DayRecord {
            replication: 0,
            day: 1,
            demand: 40,
            sold: 40,
            stockout: false,
            order_quantity: None,
            closing_inventory: 60,
            revenue: 400.0,
            order_cost: 0.0,
            holding_cost: 120.0,
            stockout_penalty: 0.0,
            profit: 280.0,
        };
        let mut out = Vec::new();
        write_history_csv(&mut out, &[record]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("replication,day,demand,sold,stockout"));
        assert_eq!(lines.next().unwrap(), "0,1,40,40,false,,60,400.0,0.0,120.0,0.0,280.0");
    }
}
