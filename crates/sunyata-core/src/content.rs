//! Verse content: the compiled-in tables and the per-chapter lookup.

use crate::error::ContentError;
use fnv::FnvHashMap;

/// One verse paired with the animation that illustrates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentEntry {
    pub id: u32,
    pub display_text: &'static str,
    pub concept_text: &'static str,
    pub parallel_text: &'static str,
    pub explanation_text: &'static str,
    pub animation_tag: &'static str,
}

#[derive(Debug)]
pub struct Chapter {
    pub number: u32,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub entries: &'static [ContentEntry],
}

/// Every chapter shipped with the application.
#[derive(Debug, Clone, Copy)]
pub struct Library {
    chapters: &'static [Chapter],
}

impl Library {
    pub const fn new(chapters: &'static [Chapter]) -> Self {
        Self { chapters }
    }

    pub fn builtin() -> Self {
        Self::new(crate::verses::CHAPTERS)
    }

    pub fn chapters(&self) -> &'static [Chapter] {
        self.chapters
    }

    pub fn chapter(&self, number: u32) -> Result<&'static Chapter, ContentError> {
        self.chapters
            .iter()
            .find(|c| c.number == number)
            .ok_or(ContentError::UnknownChapter(number))
    }

    pub fn first_chapter(&self) -> Option<&'static Chapter> {
        self.chapters.first()
    }

    pub fn registry(&self, number: u32) -> Result<ContentRegistry, ContentError> {
        ContentRegistry::new(self.chapter(number)?)
    }
}

/// Lookup table over one chapter's verses, in table order.
#[derive(Debug, Clone)]
pub struct ContentRegistry {
    chapter: &'static Chapter,
    index_by_id: FnvHashMap<u32, usize>,
}

impl ContentRegistry {
    pub fn new(chapter: &'static Chapter) -> Result<Self, ContentError> {
        if chapter.entries.is_empty() {
            return Err(ContentError::EmptyChapter(chapter.number));
        }
        let index_by_id = chapter
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id, i))
            .collect::<FnvHashMap<_, _>>();
        if index_by_id.len() != chapter.entries.len() {
            log::warn!(
                "[content] chapter {} has duplicate verse ids; later entries shadow earlier ones",
                chapter.number
            );
        }
        Ok(Self {
            chapter,
            index_by_id,
        })
    }

    pub fn chapter(&self) -> &'static Chapter {
        self.chapter
    }

    pub fn lookup(&self, id: u32) -> Result<&'static ContentEntry, ContentError> {
        self.position(id)
            .map(|i| &self.chapter.entries[i])
            .ok_or(ContentError::UnknownVerse(id))
    }

    pub fn position(&self, id: u32) -> Option<usize> {
        self.index_by_id.get(&id).copied()
    }

    pub fn first(&self) -> &'static ContentEntry {
        &self.chapter.entries[0]
    }

    pub fn last(&self) -> &'static ContentEntry {
        &self.chapter.entries[self.chapter.entries.len() - 1]
    }

    /// The verse after `id`, or `None` at the end of the chapter.
    pub fn next_after(&self, id: u32) -> Option<&'static ContentEntry> {
        let i = self.position(id)?;
        self.chapter.entries.get(i + 1)
    }

    /// The verse before `id`, or `None` at the start of the chapter.
    pub fn prev_before(&self, id: u32) -> Option<&'static ContentEntry> {
        let i = self.position(id)?;
        i.checked_sub(1).map(|p| &self.chapter.entries[p])
    }

    pub fn len(&self) -> usize {
        self.chapter.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chapter.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static ContentEntry> {
        self.chapter.entries.iter()
    }

    /// Entries whose animation tag fails `is_registered`.
    ///
    /// At runtime such entries fall back to the default animation, so the
    /// app reports them once at startup instead.
    pub fn unregistered_tags(&self, is_registered: impl Fn(&str) -> bool) -> Vec<(u32, &'static str)> {
        self.iter()
            .filter(|e| !is_registered(e.animation_tag))
            .map(|e| (e.id, e.animation_tag))
            .collect()
    }
}
