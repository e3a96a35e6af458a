use std::error::Error;
use std::fs::OpenOptions;
use std::path::Path;

/// Appends one space-delimited `episode total_reward` record to the
/// training-curve file, creating it on first use.
pub fn append_episode_reward(
    path: &Path,
    episode: usize,
    total_reward: f64,
) -> Result<(), csv::Error> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .from_writer(file);
    writer.write_record(&[episode.to_string(), total_reward.to_string()])?;
    writer.flush()?;
    Ok(())
}

/// Re-segments an appended curve file into per-run curves: a new run starts
/// wherever the episode index drops below its predecessor (i.e. training was
/// restarted against an existing file).
pub fn read_runs(path: &Path) -> Result<Vec<Vec<(usize, f64)>>, Box<dyn Error>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .from_path(path)?;

    let mut runs: Vec<Vec<(usize, f64)>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() < 2 {
            continue;
        }
        let episode: usize = record[0].parse()?;
        let total_reward: f64 = record[1].parse()?;

        let starts_new_run = runs
            .last()
            .and_then(|run| run.last())
            .map_or(true, |&(previous, _)| episode < previous);
        if starts_new_run {
            runs.push(Vec::new());
        }
        runs.last_mut()
            .expect("a run was just pushed")
            .push((episode, total_reward));
    }

    Ok(runs)
}
