//! Homology grouping of pseudo-landmarks across frames.
//!
//! Landmarks detected in two adjacent frames of a time series are grouped
//! by agglomerative hierarchical clustering over their feature-space
//! coordinates. Walking the merge tree from many clusters down to few,
//! unnamed landmark pairs on different frames become new groups and
//! singletons inherit group identities from named partners.

use phenopix_core::{Error, Result};

/// Linkage update rule for agglomerative clustering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkageMethod {
    /// Ward's minimum variance criterion.
    #[default]
    Ward,
    /// Unweighted average linkage (UPGMA).
    Average,
}

/// One merge in the agglomeration sequence.
///
/// Original observations are clusters `0..n`; the merge produced by step
/// `i` is cluster `n + i`, as in the scipy linkage convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeStep {
    /// First merged cluster id.
    pub left: usize,
    /// Second merged cluster id.
    pub right: usize,
    /// Inter-cluster distance at the merge.
    pub distance: f64,
    /// Number of original observations in the merged cluster.
    pub size: usize,
}

/// A pseudo-landmark with its frame of origin and group assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Landmark {
    /// Landmark name.
    pub name: String,
    /// Identifier of the frame the landmark was detected in.
    pub frame: String,
    /// Homology group, `None` until assigned.
    pub group: Option<u32>,
}

impl Landmark {
    /// Create an unassigned landmark.
    #[must_use]
    pub fn new(name: impl Into<String>, frame: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            frame: frame.into(),
            group: None,
        }
    }
}

/// Agglomerative hierarchical clustering over row-feature vectors.
///
/// Distances start as Euclidean and are updated with the Lance-Williams
/// recurrence for the chosen method. Returns `n - 1` merge steps.
///
/// # Errors
/// Returns [`Error::ConfigError`] when `features` is empty or rows have
/// inconsistent lengths.
pub fn linkage(features: &[Vec<f64>], method: LinkageMethod) -> Result<Vec<MergeStep>> {
    let n = features.len();
    if n == 0 {
        return Err(Error::ConfigError("linkage needs at least one row".into()));
    }
    let dim = features[0].len();
    if features.iter().any(|row| row.len() != dim) {
        return Err(Error::ConfigError(
            "feature rows have inconsistent lengths".into(),
        ));
    }

    // Full distance matrix over active clusters, indexed by cluster slot.
    let mut dist = vec![vec![0.0f64; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let d = euclidean(&features[i], &features[j]);
            dist[i][j] = d;
            dist[j][i] = d;
        }
    }

    // Slot state: cluster id and member count; None when absorbed.
    let mut clusters: Vec<Option<(usize, usize)>> = (0..n).map(|i| Some((i, 1))).collect();
    let mut steps = Vec::with_capacity(n.saturating_sub(1));

    for step in 0..n.saturating_sub(1) {
        // Find the closest active pair.
        let mut best = (0usize, 0usize, f64::INFINITY);
        for i in 0..n {
            if clusters[i].is_none() {
                continue;
            }
            for j in (i + 1)..n {
                if clusters[j].is_none() {
                    continue;
                }
                if dist[i][j] < best.2 {
                    best = (i, j, dist[i][j]);
                }
            }
        }
        let (i, j, d_ij) = best;
        let (id_i, n_i) = clusters[i].take().ok_or_else(degenerate)?;
        let (id_j, n_j) = clusters[j].take().ok_or_else(degenerate)?;

        // Merged cluster occupies slot i.
        let merged_size = n_i + n_j;
        steps.push(MergeStep {
            left: id_i.min(id_j),
            right: id_i.max(id_j),
            distance: d_ij,
            size: merged_size,
        });

        for k in 0..n {
            if k == i || k == j {
                continue;
            }
            let Some((_, n_k)) = clusters[k] else {
                continue;
            };
            let d_ki = dist[k][i];
            let d_kj = dist[k][j];
            let updated = lance_williams(method, d_ki, d_kj, d_ij, n_i, n_j, n_k);
            dist[k][i] = updated;
            dist[i][k] = updated;
        }
        clusters[i] = Some((n + step, merged_size));
    }

    Ok(steps)
}

fn degenerate() -> Error {
    Error::ConfigError("degenerate linkage state".into())
}

#[allow(clippy::cast_precision_loss)]
fn lance_williams(
    method: LinkageMethod,
    d_ki: f64,
    d_kj: f64,
    d_ij: f64,
    n_i: usize,
    n_j: usize,
    n_k: usize,
) -> f64 {
    let (n_i, n_j, n_k) = (n_i as f64, n_j as f64, n_k as f64);
    match method {
        LinkageMethod::Ward => {
            let total = n_i + n_j + n_k;
            (((n_i + n_k) * d_ki * d_ki + (n_j + n_k) * d_kj * d_kj - n_k * d_ij * d_ij) / total)
                .max(0.0)
                .sqrt()
        }
        LinkageMethod::Average => (n_i * d_ki + n_j * d_kj) / (n_i + n_j),
    }
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Cut the merge tree at `n_clusters`, returning a flat cluster label per
/// original observation. Labels are compacted by first appearance.
#[must_use]
pub fn cut_tree(steps: &[MergeStep], n_clusters: usize) -> Vec<usize> {
    let n = steps.len() + 1;
    let n_clusters = n_clusters.clamp(1, n);

    // Union-find over cluster ids 0..2n-1; apply merges until only
    // n_clusters remain.
    let mut parent: Vec<usize> = (0..2 * n - 1).collect();
    let mut remaining = n;
    for (step_index, step) in steps.iter().enumerate() {
        if remaining == n_clusters {
            break;
        }
        let merged = n + step_index;
        let left = find(&mut parent, step.left);
        let right = find(&mut parent, step.right);
        parent[left] = merged;
        parent[right] = merged;
        remaining -= 1;
    }

    let mut labels = Vec::with_capacity(n);
    let mut seen: Vec<(usize, usize)> = Vec::new();
    for obs in 0..n {
        let root = find(&mut parent, obs);
        let label = match seen.iter().find(|(r, _)| *r == root) {
            Some(&(_, label)) => label,
            None => {
                let label = seen.len();
                seen.push((root, label));
                label
            }
        };
        labels.push(label);
    }
    labels
}

fn find(parent: &mut [usize], mut id: usize) -> usize {
    while parent[id] != id {
        parent[id] = parent[parent[id]];
        id = parent[id];
    }
    id
}

/// Group pseudo-landmarks into homology groupings.
///
/// `starscape` holds one feature-space row per landmark (typically PCA
/// coordinates). `group_iter` is the next free group id; the id after the
/// last one assigned is returned.
///
/// Walking cluster counts from `n - 1` down to 3: a cluster holding exactly
/// two unnamed landmarks becomes a new pair-group when their frames differ
/// (two singleton groups otherwise); a cluster pairing one named and one
/// unnamed landmark on different frames transfers the name. Landmarks still
/// unnamed afterwards each get a fresh group.
///
/// # Errors
/// Returns [`Error::ConfigError`] when `starscape` and `landmarks` disagree
/// in length or the feature rows are malformed.
pub fn constella(
    landmarks: &mut [Landmark],
    starscape: &[Vec<f64>],
    mut group_iter: u32,
) -> Result<u32> {
    if landmarks.len() != starscape.len() {
        return Err(Error::ConfigError(format!(
            "{} landmarks but {} feature rows",
            landmarks.len(),
            starscape.len()
        )));
    }
    let n = landmarks.len();
    if n == 0 {
        return Ok(group_iter);
    }

    if n > 1 {
        let links = linkage(starscape, LinkageMethod::Ward)?;

        // For n-1 down to 3 clusters on the merge tree...
        for c in (3..n).rev() {
            let cutree = cut_tree(&links, c);
            let group_count = cutree.iter().copied().max().unwrap_or(0) + 1;

            for g in 0..group_count {
                let members: Vec<usize> = (0..n).filter(|&i| cutree[i] == g).collect();
                let unnamed: Vec<usize> = members
                    .iter()
                    .copied()
                    .filter(|&i| landmarks[i].group.is_none())
                    .collect();

                // Exactly two unnamed landmarks: pair them up.
                if unnamed.len() == 2 {
                    let (a, b) = (unnamed[0], unnamed[1]);
                    if landmarks[a].frame != landmarks[b].frame {
                        landmarks[a].group = Some(group_iter);
                        landmarks[b].group = Some(group_iter);
                        group_iter += 1;
                    } else {
                        landmarks[a].group = Some(group_iter);
                        landmarks[b].group = Some(group_iter + 1);
                        group_iter += 2;
                    }
                }

                transfer_to_unnamed(landmarks, &members);
            }
        }
    }

    // Rogues: anything still unnamed becomes its own group.
    for landmark in landmarks.iter_mut() {
        if landmark.group.is_none() {
            landmark.group = Some(group_iter);
            group_iter += 1;
        }
    }

    Ok(group_iter)
}

/// Transfer a group id to a lone unnamed cluster member when the cluster
/// holds exactly one named carrier of that id and the frames differ.
fn transfer_to_unnamed(landmarks: &mut [Landmark], members: &[usize]) {
    let unnamed: Vec<usize> = members
        .iter()
        .copied()
        .filter(|&i| landmarks[i].group.is_none())
        .collect();
    if unnamed.len() != 1 {
        return;
    }

    let mut ids: Vec<u32> = Vec::new();
    for &i in members {
        if let Some(id) = landmarks[i].group {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
    }

    for id in ids {
        let matches: Vec<usize> = members
            .iter()
            .copied()
            .filter(|&i| landmarks[i].group == Some(id))
            .collect();
        // Only a lone carrier plus the lone unnamed landmark form a pair.
        if matches.len() == 1 && matches.len() + unnamed.len() == 2 {
            let named = matches[0];
            let orphan = unnamed[0];
            if landmarks[named].frame != landmarks[orphan].frame {
                landmarks[orphan].group = Some(id);
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linkage_merges_closest_first() {
        // three points on a line: 0.0, 1.0, 10.0
        let features = vec![vec![0.0], vec![1.0], vec![10.0]];
        let steps = linkage(&features, LinkageMethod::Average).unwrap();
        assert_eq!(steps.len(), 2);
        assert_eq!((steps[0].left, steps[0].right), (0, 1));
        assert_relative_eq!(steps[0].distance, 1.0);
        assert_eq!(steps[0].size, 2);
        assert_eq!(steps[1].size, 3);
        // average of |10-0| and |10-1|
        assert_relative_eq!(steps[1].distance, 9.5);
    }

    #[test]
    fn test_linkage_rejects_ragged_input() {
        let features = vec![vec![0.0, 1.0], vec![2.0]];
        assert!(matches!(
            linkage(&features, LinkageMethod::Ward),
            Err(Error::ConfigError(_))
        ));
    }

    #[test]
    fn test_cut_tree_label_counts() {
        let features = vec![vec![0.0], vec![0.5], vec![10.0], vec![10.5]];
        let steps = linkage(&features, LinkageMethod::Ward).unwrap();

        let two = cut_tree(&steps, 2);
        assert_eq!(two[0], two[1]);
        assert_eq!(two[2], two[3]);
        assert_ne!(two[0], two[2]);

        let four = cut_tree(&steps, 4);
        assert_eq!(four, vec![0, 1, 2, 3]);

        let one = cut_tree(&steps, 1);
        assert!(one.iter().all(|&l| l == 0));
    }

    #[test]
    fn test_ward_prefers_compact_merges() {
        let features = vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![5.0, 0.0], vec![5.0, 1.1]];
        let steps = linkage(&features, LinkageMethod::Ward).unwrap();
        let labels = cut_tree(&steps, 2);
        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[2], labels[3]);
    }
}
