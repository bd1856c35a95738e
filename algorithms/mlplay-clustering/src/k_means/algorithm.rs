use std::collections::HashMap;

use mlplay::{Coordinates, Dataset, Float, PointId};
use mlplay_nn::{Distance, L2Dist};
use ndarray::{Array1, Array2, ArrayBase, Data, Ix1, Ix2, Zip};
use ndarray_rand::rand::{Rng, SeedableRng};
use rand_isaac::Isaac64Rng;
use tracing::{debug, warn};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use super::errors::{KMeansError, KMeansParamsError};
use super::hyperparams::{KMeansParams, KMeansValidParams};
use super::init::{random_centroids, InitBounds};

/// Cluster index of every point, as produced by one assign step
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    ids: Vec<PointId>,
    memberships: Array1<usize>,
    positions: HashMap<PointId, usize>,
}

impl Assignment {
    fn new(ids: Vec<PointId>, memberships: Array1<usize>) -> Self {
        let positions = ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();

        Assignment {
            ids,
            memberships,
            positions,
        }
    }

    /// Cluster of the point `id`, if it took part in the assign step
    pub fn cluster_of(&self, id: PointId) -> Option<usize> {
        self.positions.get(&id).map(|&i| self.memberships[i])
    }

    /// Cluster indices in the dataset order of the assign step
    pub fn memberships(&self) -> &Array1<usize> {
        &self.memberships
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Pairs of point identifier and cluster index
    pub fn iter(&self) -> impl Iterator<Item = (PointId, usize)> + '_ {
        self.ids.iter().copied().zip(self.memberships.iter().copied())
    }

    /// Number of points in each of the `n_clusters` clusters
    ///
    /// Memberships beyond `n_clusters` are not counted.
    pub fn cluster_sizes(&self, n_clusters: usize) -> Array1<usize> {
        let mut sizes = Array1::zeros(n_clusters);
        for &c in self.memberships.iter().filter(|&&c| c < n_clusters) {
            sizes[c] += 1;
        }

        sizes
    }
}

/// Given a matrix of centroids with shape `(n_centroids, 2)` and an observation,
/// return the index of the closest centroid and its squared distance.
///
/// Ties go to the lowest index. `centroids` must have at least one row.
pub(crate) fn closest_centroid<F: Float>(
    // (n_centroids, 2)
    centroids: &ArrayBase<impl Data<Elem = F>, Ix2>,
    // (2)
    observation: &ArrayBase<impl Data<Elem = F>, Ix1>,
) -> (usize, F) {
    let first_centroid = centroids.row(0);
    let (mut closest_index, mut minimum_distance) =
        (0, L2Dist.rdistance(first_centroid.view(), observation.view()));

    for (centroid_index, centroid) in centroids.rows().into_iter().enumerate().skip(1) {
        let distance = L2Dist.rdistance(centroid.view(), observation.view());
        if distance < minimum_distance {
            closest_index = centroid_index;
            minimum_distance = distance;
        }
    }
    (closest_index, minimum_distance)
}

fn check_centroids<F>(centroids: &ArrayBase<impl Data<Elem = F>, Ix2>) -> Result<(), KMeansError> {
    let (rows, cols) = centroids.dim();
    if rows == 0 || cols != 2 {
        Err(KMeansError::CentroidShape(rows, cols))
    } else {
        Ok(())
    }
}

fn assign_memberships<F: Float>(
    dataset: &Dataset<F>,
    centroids: &ArrayBase<impl Data<Elem = F>, Ix2>,
) -> (Assignment, F) {
    let records = dataset.records();
    let mut memberships = Array1::<usize>::zeros(dataset.len());
    let mut dists = Array1::<F>::zeros(dataset.len());

    Zip::from(records.rows())
        .and(&mut memberships)
        .and(&mut dists)
        .for_each(|observation, membership, dist| {
            let (m, d) = closest_centroid(centroids, &observation);
            *membership = m;
            *dist = d;
        });

    let ids = dataset.iter().map(|p| p.id).collect();
    (Assignment::new(ids, memberships), dists.sum())
}

/// Assign every point of `dataset` to its closest centroid
///
/// Returns the assignment together with the sum of squared distances (SSE) between the points
/// and their centroids. Ties go to the centroid with the lowest index. The centroids are not
/// touched. Fails if `centroids` is not a non-empty `(n_clusters, 2)` matrix.
pub fn assign_step<F: Float>(
    dataset: &Dataset<F>,
    centroids: &ArrayBase<impl Data<Elem = F>, Ix2>,
) -> Result<(Assignment, F), KMeansError> {
    check_centroids(centroids)?;
    Ok(assign_memberships(dataset, centroids))
}

/// Move every centroid to the mean of its members
///
/// Returns `n_clusters` centroids. A cluster without members is reseeded uniformly within
/// `bounds`. Points of `dataset` missing from `assignment` are ignored.
pub fn update_step<F: Float, R: Rng>(
    dataset: &Dataset<F>,
    assignment: &Assignment,
    n_clusters: usize,
    bounds: &InitBounds<F>,
    rng: &mut R,
) -> Array2<F> {
    let mut centroids = Array2::zeros((n_clusters, 2));
    let mut counts: Array1<usize> = Array1::zeros(n_clusters);

    for point in dataset.iter() {
        if let Some(c) = assignment.cluster_of(point.id).filter(|&c| c < n_clusters) {
            let mut centroid = centroids.row_mut(c);
            centroid[0] += point.x;
            centroid[1] += point.y;
            counts[c] += 1;
        }
    }

    let mut reseeded = Vec::new();
    for (c, (mut centroid, &count)) in centroids.rows_mut().into_iter().zip(&counts).enumerate() {
        if count > 0 {
            centroid /= F::cast(count);
        } else {
            centroid[0] = bounds.sample(rng);
            centroid[1] = bounds.sample(rng);
            reseeded.push(c);
        }
    }

    if !reseeded.is_empty() {
        warn!(?reseeded, "empty clusters reseeded at random");
    }

    centroids
}

/// Stage of a k-means session
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KMeansState {
    /// Centroids exist, no point has been assigned yet
    Uninitialized,
    /// The last step was an assign, an update may follow
    Assigned,
    /// The last step was an update, the next step has to be an assign
    Updated,
}

/// Outcome of [`KMeans::run`]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct KMeansRun<F> {
    /// Number of assign/update cycles performed
    pub n_iterations: u64,
    /// SSE of the assign step of every cycle
    pub sse_history: Vec<F>,
    /// Whether the SSE settled within `tolerance` before `max_n_iterations` cycles
    pub converged: bool,
}

/// K-means clustering partitions unlabelled points into `n_clusters` clusters, where each point
/// belongs to the cluster with the nearest mean, called its *centroid*.
///
/// This is the classroom variant of the standard algorithm (Lloyd's algorithm): instead of
/// running to convergence in one call, the session exposes both halves of an iteration so every
/// step can be watched:
///
/// - assignment step: assign each point to the nearest centroid;
/// - update step: move each centroid to the mean of its points.
///
/// Centroids start at random positions inside the configured bounds. A cluster losing all its
/// points is reseeded at random, which is the only way the SSE can grow from one cycle to the
/// next.
///
/// The session is a small state machine. The first assign leaves
/// [`Uninitialized`](KMeansState::Uninitialized), after that assign and update alternate, and an
/// update is only accepted right after an assign. Changing the number of clusters, setting
/// centroids or resetting the session discards the assignment.
///
/// ## Tutorial
///
/// ```
/// use mlplay_clustering::{KMeans, KMeansState};
/// use mlplay_datasets::presets;
/// use ndarray_rand::rand::SeedableRng;
/// use rand_isaac::Isaac64Rng;
///
/// // Our random number generator, seeded for reproducibility
/// let mut rng = Isaac64Rng::seed_from_u64(42);
/// let dataset = presets::kmeans_playground(&mut rng);
///
/// let mut session = KMeans::params_with_rng(3, rng).start().unwrap();
/// assert_eq!(session.state(), KMeansState::Uninitialized);
///
/// // one step at a time
/// let sse = session.assign(&dataset);
/// session.update(&dataset).unwrap();
/// assert_eq!(session.state(), KMeansState::Updated);
///
/// // or until the SSE settles
/// let run = session.run(&dataset);
/// assert!(run.sse_history.len() as u64 == run.n_iterations);
/// assert_eq!(session.cluster_sizes().sum(), dataset.len());
/// # let _ = sse;
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct KMeans<F: Float, R: Rng = Isaac64Rng> {
    params: KMeansValidParams<F, R>,
    centroids: Array2<F>,
    assignment: Option<Assignment>,
    sse: Option<F>,
    state: KMeansState,
}

impl<F: Float> KMeans<F, Isaac64Rng> {
    /// Hyperparameters with a random number generator seeded from system entropy
    pub fn params(n_clusters: usize) -> KMeansParams<F, Isaac64Rng> {
        KMeansParams::new(n_clusters, Isaac64Rng::from_entropy())
    }
}

impl<F: Float, R: Rng> KMeans<F, R> {
    pub fn params_with_rng(n_clusters: usize, rng: R) -> KMeansParams<F, R> {
        KMeansParams::new(n_clusters, rng)
    }

    /// Open a session with random centroids and no assignment
    pub fn new(mut params: KMeansValidParams<F, R>) -> Self {
        let n_clusters = params.n_clusters();
        let (bounds, rng) = params.bounds_and_rng();
        let centroids = random_centroids(n_clusters, bounds, rng);

        KMeans {
            params,
            centroids,
            assignment: None,
            sse: None,
            state: KMeansState::Uninitialized,
        }
    }

    /// Assign every point to its closest centroid and return the SSE
    pub fn assign(&mut self, dataset: &Dataset<F>) -> F {
        let (assignment, sse) = assign_memberships(dataset, &self.centroids);
        debug!(n_points = assignment.len(), sse = %sse, "assign step");

        self.assignment = Some(assignment);
        self.sse = Some(sse);
        self.state = KMeansState::Assigned;

        sse
    }

    /// Move the centroids to the means of the current assignment
    ///
    /// Fails with [`KMeansError::NoAssignment`] unless the previous step was an assign.
    pub fn update(&mut self, dataset: &Dataset<F>) -> Result<(), KMeansError> {
        match (self.state, &self.assignment) {
            (KMeansState::Assigned, Some(assignment)) => {
                let n_clusters = self.params.n_clusters();
                let (bounds, rng) = self.params.bounds_and_rng();
                self.centroids = update_step(dataset, assignment, n_clusters, bounds, rng);
                self.state = KMeansState::Updated;
                debug!(n_clusters, "update step");

                Ok(())
            }
            _ => Err(KMeansError::NoAssignment),
        }
    }

    /// One assign step followed by one update step, returns the SSE of the assign step
    pub fn step(&mut self, dataset: &Dataset<F>) -> F {
        let sse = self.assign(dataset);
        if let Some(assignment) = &self.assignment {
            let n_clusters = self.params.n_clusters();
            let (bounds, rng) = self.params.bounds_and_rng();
            self.centroids = update_step(dataset, assignment, n_clusters, bounds, rng);
            self.state = KMeansState::Updated;
        }

        sse
    }

    /// Cycle until the SSE changes by at most `tolerance` or `max_n_iterations` is reached
    pub fn run(&mut self, dataset: &Dataset<F>) -> KMeansRun<F> {
        let tolerance = self.params.tolerance();
        let max_n_iterations = self.params.max_n_iterations();

        let mut sse_history = Vec::new();
        let mut converged = false;
        let mut n_iterations = 0;

        while n_iterations < max_n_iterations {
            let sse = self.step(dataset);
            n_iterations += 1;
            debug!(iteration = n_iterations, sse = %sse, "k-means cycle");

            let settled = sse_history
                .last()
                .map(|&previous: &F| (previous - sse).abs() <= tolerance)
                .unwrap_or(false);
            sse_history.push(sse);

            if settled {
                converged = true;
                break;
            }
        }

        if !converged {
            debug!(max_n_iterations, "k-means stopped before the SSE settled");
        }

        KMeansRun {
            n_iterations,
            sse_history,
            converged,
        }
    }

    /// Change the number of clusters
    ///
    /// All centroids are drawn again and the assignment is discarded.
    pub fn set_n_clusters(&mut self, n_clusters: usize) -> Result<(), KMeansError> {
        if n_clusters == 0 {
            return Err(KMeansParamsError::NClusters.into());
        }

        self.params.set_n_clusters(n_clusters);
        self.reset();

        Ok(())
    }

    /// Replace the centroids, for example with positions picked by hand
    ///
    /// `centroids` must have shape `(n_clusters, 2)`, `n_clusters` follows its number of rows.
    /// The assignment is discarded.
    pub fn set_centroids(&mut self, centroids: Array2<F>) -> Result<(), KMeansError> {
        check_centroids(&centroids)?;

        self.params.set_n_clusters(centroids.nrows());
        self.centroids = centroids;
        self.clear_assignment();

        Ok(())
    }

    /// Draw fresh random centroids and forget the assignment
    pub fn reset(&mut self) {
        let n_clusters = self.params.n_clusters();
        let (bounds, rng) = self.params.bounds_and_rng();
        self.centroids = random_centroids(n_clusters, bounds, rng);
        self.clear_assignment();
    }

    fn clear_assignment(&mut self) {
        self.assignment = None;
        self.sse = None;
        self.state = KMeansState::Uninitialized;
    }

    /// Return the set of centroids as a 2-dimensional matrix with shape `(n_clusters, 2)`.
    pub fn centroids(&self) -> &Array2<F> {
        &self.centroids
    }

    /// Assignment of the last assign step, `None` before the first one
    pub fn assignment(&self) -> Option<&Assignment> {
        self.assignment.as_ref()
    }

    /// SSE of the last assign step
    pub fn sse(&self) -> Option<F> {
        self.sse
    }

    pub fn state(&self) -> KMeansState {
        self.state
    }

    pub fn n_clusters(&self) -> usize {
        self.params.n_clusters()
    }

    pub fn params(&self) -> &KMeansValidParams<F, R> {
        &self.params
    }

    /// Number of points per cluster in the last assignment, all zeros before the first one
    pub fn cluster_sizes(&self) -> Array1<usize> {
        match &self.assignment {
            Some(assignment) => assignment.cluster_sizes(self.n_clusters()),
            None => Array1::zeros(self.n_clusters()),
        }
    }

    /// Index of the centroid closest to `query`
    pub fn closest_cluster(&self, query: &impl Coordinates<F>) -> usize {
        let observation = Array1::from(query.coords().to_vec());
        closest_centroid(&self.centroids, &observation).0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use mlplay::{ClassLabel, ParamGuard};
    use ndarray::array;

    fn four_points() -> Dataset<f64> {
        let mut dataset = Dataset::new();
        dataset.push(0.1, 0.1, None);
        dataset.push(0.2, 0.2, None);
        dataset.push(0.8, 0.8, None);
        dataset.push(0.9, 0.9, Some(ClassLabel::B));
        dataset
    }

    fn session(n_clusters: usize) -> KMeans<f64> {
        KMeans::params_with_rng(n_clusters, Isaac64Rng::seed_from_u64(42))
            .start()
            .unwrap()
    }

    #[test]
    fn assign_picks_nearest_centroid() {
        let dataset = four_points();
        let centroids = array![[0.0, 0.0], [1.0, 1.0]];

        let (assignment, sse) = assign_step(&dataset, &centroids).unwrap();
        assert_eq!(assignment.memberships(), &array![0, 0, 1, 1]);
        assert_eq!(assignment.cluster_of(PointId(3)), Some(1));
        assert_eq!(assignment.cluster_of(PointId(7)), None);
        // 0.02 + 0.08 + 0.08 + 0.02
        assert_abs_diff_eq!(sse, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn assign_ties_go_to_lowest_index() {
        let mut dataset = Dataset::new();
        dataset.push(0.5, 0.5, None);
        let centroids = array![[0.4, 0.5], [0.6, 0.5], [0.5, 0.4]];

        let (assignment, _) = assign_step(&dataset, &centroids).unwrap();
        assert_eq!(assignment.memberships(), &array![0]);
    }

    #[test]
    fn assign_rejects_bad_centroids() {
        let dataset = four_points();
        assert!(matches!(
            assign_step(&dataset, &Array2::<f64>::zeros((0, 2))),
            Err(KMeansError::CentroidShape(0, 2))
        ));
        assert!(matches!(
            assign_step(&dataset, &Array2::<f64>::zeros((2, 3))),
            Err(KMeansError::CentroidShape(2, 3))
        ));
    }

    #[test]
    fn update_moves_to_means_and_reseeds_empty() {
        let dataset = four_points();
        let centroids = array![[0.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        let (assignment, _) = assign_step(&dataset, &centroids).unwrap();

        let mut rng = Isaac64Rng::seed_from_u64(1);
        let bounds = InitBounds::default();
        let updated = update_step(&dataset, &assignment, 3, &bounds, &mut rng);

        assert_abs_diff_eq!(updated.row(0), array![0.15, 0.15], epsilon = 1e-12);
        assert_abs_diff_eq!(updated.row(1), array![0.85, 0.85], epsilon = 1e-12);
        // the third cluster had no members
        assert!(updated.row(2).iter().all(|&v| (0.1..0.9).contains(&v)));
    }

    #[test]
    fn update_ignores_unassigned_points() {
        let mut dataset = four_points();
        let centroids = array![[0.0, 0.0], [1.0, 1.0]];
        let (assignment, _) = assign_step(&dataset, &centroids).unwrap();

        dataset.push(0.0, 1.0, None);
        let mut rng = Isaac64Rng::seed_from_u64(1);
        let updated = update_step(&dataset, &assignment, 2, &InitBounds::default(), &mut rng);

        assert_abs_diff_eq!(updated, array![[0.15, 0.15], [0.85, 0.85]], epsilon = 1e-12);
    }

    #[test]
    fn empty_dataset() {
        let dataset = Dataset::<f64>::new();
        let mut session = session(2);

        assert_abs_diff_eq!(session.assign(&dataset), 0.0);
        session.update(&dataset).unwrap();
        assert_eq!(session.centroids().dim(), (2, 2));
        assert_eq!(session.cluster_sizes(), array![0, 0]);
    }

    #[test]
    fn update_requires_assign() {
        let dataset = four_points();
        let mut session = session(2);

        assert!(matches!(
            session.update(&dataset),
            Err(KMeansError::NoAssignment)
        ));

        session.assign(&dataset);
        assert_eq!(session.state(), KMeansState::Assigned);
        session.update(&dataset).unwrap();
        assert_eq!(session.state(), KMeansState::Updated);

        // a second update needs a new assignment
        assert!(matches!(
            session.update(&dataset),
            Err(KMeansError::NoAssignment)
        ));
    }

    #[test]
    fn changing_k_discards_assignment() {
        let dataset = four_points();
        let mut session = session(2);
        session.assign(&dataset);

        session.set_n_clusters(3).unwrap();
        assert_eq!(session.n_clusters(), 3);
        assert_eq!(session.centroids().dim(), (3, 2));
        assert_eq!(session.state(), KMeansState::Uninitialized);
        assert!(session.assignment().is_none());
        assert!(session.sse().is_none());
        assert!(session
            .centroids()
            .iter()
            .all(|&v| (0.1..0.9).contains(&v)));

        assert!(matches!(
            session.set_n_clusters(0),
            Err(KMeansError::InvalidParams(KMeansParamsError::NClusters))
        ));
        assert_eq!(session.n_clusters(), 3);
    }

    #[test]
    fn set_centroids_checks_shape() {
        let mut session = session(2);
        assert!(session.set_centroids(Array2::zeros((3, 1))).is_err());

        session
            .set_centroids(array![[0.1, 0.1], [0.5, 0.5], [0.9, 0.9]])
            .unwrap();
        assert_eq!(session.n_clusters(), 3);
        assert_eq!(session.closest_cluster(&[0.45, 0.6]), 1);
    }

    #[test]
    fn step_converges_on_two_pairs() {
        let dataset = four_points();
        let mut session = session(2);
        session
            .set_centroids(array![[0.1, 0.1], [0.2, 0.2]])
            .unwrap();

        let run = session.run(&dataset);
        assert!(run.converged);
        assert!(run.n_iterations <= 100);
        assert_eq!(session.cluster_sizes(), array![2, 2]);
        assert_abs_diff_eq!(
            session.centroids(),
            &array![[0.15, 0.15], [0.85, 0.85]],
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(session.sse().unwrap(), 0.02, epsilon = 1e-12);
    }

    #[test]
    fn reset_draws_new_centroids() {
        let mut session = session(3);
        let before = session.centroids().clone();
        session.reset();

        assert_ne!(&before, session.centroids());
        assert_eq!(session.state(), KMeansState::Uninitialized);
    }

    #[test]
    fn seeded_sessions_agree() {
        let dataset = four_points();
        let mut a = session(2);
        let mut b = session(2);

        assert_eq!(a.centroids(), b.centroids());
        assert_eq!(a.run(&dataset), b.run(&dataset));
        assert_eq!(a.centroids(), b.centroids());
    }

    #[test]
    fn params_check_before_start() {
        let params = KMeans::<f64, _>::params_with_rng(0, Isaac64Rng::seed_from_u64(0));
        assert!(params.check_ref().is_err());
        assert!(matches!(
            KMeans::<f64, _>::params_with_rng(0, Isaac64Rng::seed_from_u64(0)).start(),
            Err(KMeansError::InvalidParams(KMeansParamsError::NClusters))
        ));
    }
}
