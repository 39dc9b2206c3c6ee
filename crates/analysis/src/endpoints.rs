//! Final-timepoint (endpoint) extraction.

use std::collections::BTreeMap;

use trial_core::{Error, Observation, Result, SubjectId, Timepoint, VolumeMm3};

/// All observations at each subject's maximum timepoint.
///
/// Ties at the maximum are all returned and left to the caller to
/// disambiguate: deduplicated data cannot contain them, but raw data
/// can, and silently picking one would hide the defect. Output is
/// sorted by subject identifier; a subject's tied records keep their
/// input order.
pub fn final_observations(observations: &[Observation]) -> Vec<Observation> {
    let mut latest: BTreeMap<&str, (Timepoint, Vec<&Observation>)> = BTreeMap::new();

    for obs in observations {
        match latest.get_mut(obs.subject_id()) {
            Some((max_tp, group)) => {
                if obs.timepoint() > *max_tp {
                    *max_tp = obs.timepoint();
                    group.clear();
                    group.push(obs);
                } else if obs.timepoint() == *max_tp {
                    group.push(obs);
                }
            }
            None => {
                latest.insert(obs.subject_id(), (obs.timepoint(), vec![obs]));
            }
        }
    }

    latest
        .into_values()
        .flat_map(|(_, group)| group)
        .cloned()
        .collect()
}

/// Subject → final tumor volume mapping for a cleaned dataset.
///
/// Fails with a `Data` error if any subject still has more than one
/// record at its maximum timepoint (an ambiguous endpoint).
pub fn final_volumes(observations: &[Observation]) -> Result<BTreeMap<SubjectId, VolumeMm3>> {
    let mut volumes = BTreeMap::new();

    for obs in final_observations(observations) {
        let subject_id = obs.subject_id().to_string();
        if volumes.insert(subject_id, obs.tumor_volume()).is_some() {
            return Err(Error::data(format!(
                "ambiguous endpoint for subject {}",
                obs.subject_id()
            )));
        }
    }

    Ok(volumes)
}
