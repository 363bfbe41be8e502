// Verse tables and navigation order.

use sunyata_core::{builtin_registry, Chapter, ContentEntry, ContentError, ContentRegistry, Library};

static TINY: Chapter = Chapter {
    number: 99,
    title: "Test",
    subtitle: "",
    entries: &[
        ContentEntry {
            id: 4,
            display_text: "four",
            concept_text: "",
            parallel_text: "",
            explanation_text: "",
            animation_tag: "superposition",
        },
        ContentEntry {
            id: 9,
            display_text: "nine",
            concept_text: "",
            parallel_text: "",
            explanation_text: "",
            animation_tag: "not_registered",
        },
        ContentEntry {
            id: 12,
            display_text: "twelve",
            concept_text: "",
            parallel_text: "",
            explanation_text: "",
            animation_tag: "tunneling",
        },
    ],
};

static EMPTY: Chapter = Chapter {
    number: 0,
    title: "Empty",
    subtitle: "",
    entries: &[],
};

#[test]
fn lookup_by_id_and_unknown_id() {
    let reg = ContentRegistry::new(&TINY).unwrap();
    assert_eq!(reg.lookup(9).unwrap().display_text, "nine");
    assert_eq!(reg.lookup(5), Err(ContentError::UnknownVerse(5)));
    assert_eq!(reg.position(12), Some(2));
}

#[test]
fn navigation_follows_table_order_and_stops_at_ends() {
    let reg = ContentRegistry::new(&TINY).unwrap();
    assert_eq!(reg.first().id, 4);
    assert_eq!(reg.last().id, 12);
    assert_eq!(reg.next_after(4).map(|e| e.id), Some(9));
    assert_eq!(reg.next_after(9).map(|e| e.id), Some(12));
    assert_eq!(reg.next_after(12), None);
    assert_eq!(reg.prev_before(12).map(|e| e.id), Some(9));
    assert_eq!(reg.prev_before(4), None);
    assert_eq!(reg.next_after(77), None);
}

#[test]
fn empty_chapter_is_rejected() {
    assert_eq!(ContentRegistry::new(&EMPTY).unwrap_err(), ContentError::EmptyChapter(0));
}

#[test]
fn unregistered_tags_are_listed() {
    let reg = ContentRegistry::new(&TINY).unwrap();
    let animations = builtin_registry();
    assert_eq!(
        reg.unregistered_tags(|t| animations.contains(t)),
        vec![(9, "not_registered")]
    );
}

#[test]
fn builtin_library_is_well_formed() {
    let lib = Library::builtin();
    assert!(!lib.chapters().is_empty());
    let animations = builtin_registry();
    for chapter in lib.chapters() {
        let reg = ContentRegistry::new(chapter).unwrap();
        assert_eq!(reg.len(), chapter.entries.len(), "duplicate ids in chapter {}", chapter.number);
        assert!(
            reg.unregistered_tags(|t| animations.contains(t)).is_empty(),
            "chapter {} names an unknown animation",
            chapter.number
        );
        for e in reg.iter() {
            assert!(!e.display_text.is_empty(), "chapter {} verse {} has no text", chapter.number, e.id);
            assert!(!e.parallel_text.is_empty());
        }
    }
}

#[test]
fn library_chapter_lookup() {
    let lib = Library::builtin();
    let first = lib.first_chapter().unwrap();
    assert_eq!(lib.chapter(first.number).unwrap().number, first.number);
    assert_eq!(lib.chapter(4242).unwrap_err(), ContentError::UnknownChapter(4242));
    assert!(lib.registry(4242).is_err());
}

#[test]
fn every_builtin_animation_is_used_somewhere() {
    let lib = Library::builtin();
    let animations = builtin_registry();
    for tag in animations.tags() {
        let used = lib
            .chapters()
            .iter()
            .flat_map(|c| c.entries.iter())
            .any(|e| e.animation_tag == *tag);
        assert!(used, "animation `{tag}` is never shown");
    }
}
