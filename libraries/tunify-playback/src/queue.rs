//! Playback queue
//!
//! Ordered list of tracks plus a cursor. The cursor is `None` exactly when
//! the queue is empty; every mutation keeps it a valid index otherwise.

use crate::error::{PlaybackError, Result};
use tunify_core::Track;

/// Ordered tracks with a cursor
#[derive(Debug, Clone, Default)]
pub struct Queue {
    tracks: Vec<Track>,
    cursor: Option<usize>,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the queue and place the cursor at `start`
    ///
    /// Leaves the queue untouched when `tracks` is empty or `start` is out of
    /// range.
    pub fn replace(&mut self, tracks: Vec<Track>, start: usize) -> Result<()> {
        if tracks.is_empty() {
            return Err(PlaybackError::QueueEmpty);
        }
        if start >= tracks.len() {
            return Err(PlaybackError::IndexOutOfBounds {
                index: start,
                len: tracks.len(),
            });
        }
        self.tracks = tracks;
        self.cursor = Some(start);
        Ok(())
    }

    /// Remove every track
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.cursor = None;
    }

    /// Move the cursor to `index`
    pub fn set_cursor(&mut self, index: usize) -> Result<()> {
        if index >= self.tracks.len() {
            return Err(PlaybackError::IndexOutOfBounds {
                index,
                len: self.tracks.len(),
            });
        }
        self.cursor = Some(index);
        Ok(())
    }

    /// Track under the cursor
    pub fn current(&self) -> Option<&Track> {
        self.cursor.and_then(|i| self.tracks.get(i))
    }

    /// Cursor position
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// All tracks in order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Index after the cursor, wrapping to the start
    pub fn next_index(&self) -> Option<usize> {
        self.cursor.map(|i| (i + 1) % self.tracks.len())
    }

    /// Index before the cursor, wrapping to the end
    pub fn previous_index(&self) -> Option<usize> {
        let len = self.tracks.len();
        self.cursor.map(|i| (i + len - 1) % len)
    }

    /// Whether a track follows the cursor without wrapping
    pub fn has_next(&self) -> bool {
        self.cursor.is_some_and(|i| i + 1 < self.tracks.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_track(id: &str) -> Track {
        Track::new(id, format!("Song {id}"), "Artist", format!("https://cdn/{id}.m4a"))
    }

    fn tracks(n: usize) -> Vec<Track> {
        (0..n).map(|i| create_test_track(&i.to_string())).collect()
    }

    #[test]
    fn empty_queue_has_no_cursor() {
        let queue = Queue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.cursor(), None);
        assert_eq!(queue.next_index(), None);
        assert_eq!(queue.previous_index(), None);
        assert!(!queue.has_next());
    }

    #[test]
    fn replace_sets_cursor() {
        let mut queue = Queue::new();
        queue.replace(tracks(3), 1).unwrap();

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.cursor(), Some(1));
        assert_eq!(queue.current().unwrap().id.as_str(), "1");
    }

    #[test]
    fn invalid_replace_keeps_previous_queue() {
        let mut queue = Queue::new();
        queue.replace(tracks(2), 0).unwrap();

        assert_eq!(queue.replace(vec![], 0), Err(PlaybackError::QueueEmpty));
        assert_eq!(
            queue.replace(tracks(3), 3),
            Err(PlaybackError::IndexOutOfBounds { index: 3, len: 3 })
        );
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.cursor(), Some(0));
    }

    #[test]
    fn wraparound_navigation() {
        let mut queue = Queue::new();
        queue.replace(tracks(3), 2).unwrap();
        assert_eq!(queue.next_index(), Some(0));
        assert!(!queue.has_next());

        queue.set_cursor(0).unwrap();
        assert_eq!(queue.previous_index(), Some(2));
        assert!(queue.has_next());
    }

    #[test]
    fn single_track_wraps_to_itself() {
        let mut queue = Queue::new();
        queue.replace(tracks(1), 0).unwrap();
        assert_eq!(queue.next_index(), Some(0));
        assert_eq!(queue.previous_index(), Some(0));
    }

    #[test]
    fn set_cursor_rejects_out_of_range() {
        let mut queue = Queue::new();
        queue.replace(tracks(2), 0).unwrap();
        assert!(queue.set_cursor(5).is_err());
        assert_eq!(queue.cursor(), Some(0));
    }

    #[test]
    fn clear_resets_cursor() {
        let mut queue = Queue::new();
        queue.replace(tracks(2), 1).unwrap();
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.current(), None);
    }
}
