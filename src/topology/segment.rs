//! Connected-component labeling over a grid.

use ndarray::Array2;

use crate::location::Location;
use crate::shape::Direction;

/// A grid whose cells may be grouped into 4-connected segments.
pub trait SegmentSubject {
    /// `(width, height)` of the grid.
    fn dims(&self) -> (usize, usize);

    /// Whether `location` takes part in labeling at all.
    fn belongs_to_segment(&self, location: Location) -> bool;

    /// Whether `location` joins its neighbor in `direction`.
    ///
    /// Only ever asked for the [backward](Direction::BACKWARD_VARIANTS) directions, and only when that neighbor is on the grid.
    fn connected(&self, location: Location, direction: Direction) -> bool;
}

/// Connected component labels, one per grid cell.
///
/// Labels start at 1 and need not be contiguous; 0 marks cells outside every segment.
#[derive(Clone, Debug)]
pub struct Segments {
    labels: Array2<usize>,
    count: usize,
}

impl Segments {
    /// The label of `location`, if it belongs to a segment.
    pub fn label_at(&self, location: Location) -> Option<usize> {
        self.labels.get(location.as_index()).copied().filter(|&label| label != 0)
    }

    /// Number of distinct segments.
    pub fn count(&self) -> usize {
        self.count
    }
}

/// Label the segments of `subject` in a single row-major pass.
///
/// Each cell looks only north and west. When both neighbors are joined but carry different labels, the west label is
/// rewritten to the north one across everything visited so far.
pub fn label_segments(subject: &impl SegmentSubject) -> Segments {
    let (width, height) = subject.dims();
    let mut labels = Array2::<usize>::zeros((height, width));
    let mut next_label = 1;
    let mut count = 0;

    for y in 0..height {
        for x in 0..width {
            let location = Location(x, y);
            if !subject.belongs_to_segment(location) {
                continue;
            }

            let [north, west] = Direction::BACKWARD_VARIANTS.map(|direction| {
                // stepping off the top or left edge wraps to an index past the grid
                let label = *labels.get(direction.attempt_from(location).as_index())?;
                (label != 0 && subject.connected(location, direction)).then_some(label)
            });

            let label = match (north, west) {
                (None, None) => {
                    count += 1;
                    next_label += 1;
                    next_label - 1
                }
                (Some(label), None) | (None, Some(label)) => label,
                (Some(north), Some(west)) => {
                    if north != west {
                        labels.iter_mut()
                            .take(y * width + x)
                            .filter(|label| **label == west)
                            .for_each(|label| *label = north);
                        count -= 1;
                    }
                    north
                }
            };
            labels[(y, x)] = label;
        }
    }

    Segments { labels, count }
}
