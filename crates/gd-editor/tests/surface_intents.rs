//! Integration tests: composition surface commands (gd-editor).
//!
//! Exercises selection, duplicate, delete, rotation and view handling
//! directly on the `DesignSurface` without going through pointer events.

use gd_core::ingest::DecodedImage;
use gd_core::model::*;
use gd_core::{ElementId, IngestError, Placement};
use gd_editor::{DesignSurface, Designer, Intent};
use pretty_assertions::assert_eq;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn upload(surface: &mut DesignSurface, name: &str) -> ElementId {
    let image = DecodedImage::from_rgba(600, 400, vec![90; 600 * 400 * 4]).unwrap();
    surface.ingest(name, &image)
}

#[test]
fn duplicate_copies_everything_but_id_and_position() {
    init_logging();
    let mut surface = DesignSurface::default();
    let id = upload(&mut surface, "blob:logo");
    surface.set_rotation(id, 30.0);
    let (x, y) = {
        let el = surface.get(id).unwrap();
        (el.x, el.y)
    };

    let copy_id = surface.duplicate(id).unwrap();
    assert!(copy_id != id);
    assert_eq!(surface.selected(), Some(copy_id));

    let original = surface.get(id).unwrap().clone();
    let copy = surface.get(copy_id).unwrap();
    assert_eq!((copy.x, copy.y), (x + 20.0, y + 20.0));
    assert_eq!(copy.src, original.src);
    assert_eq!((copy.width, copy.height), (original.width, original.height));
    assert_eq!(copy.rotation, original.rotation);
    assert_eq!(copy.colors, original.colors);
    assert_eq!(copy.view, original.view);
    assert_eq!(
        (copy.original_width, copy.original_height),
        (original.original_width, original.original_height)
    );
}

#[test]
fn duplicate_ids_are_unique() {
    let mut surface = DesignSurface::default();
    let id = upload(&mut surface, "blob:many");
    let mut ids = vec![id];
    for _ in 0..5 {
        ids.push(surface.duplicate(id).unwrap());
    }
    let mut unique = ids.clone();
    unique.sort_by_key(|id| id.as_str().to_owned());
    unique.dedup();
    assert_eq!(unique.len(), ids.len());
    for el in surface.elements() {
        assert!(Placement::of(el).fits(surface.zone()));
    }
}

#[test]
fn delete_selected_clears_selection() {
    let mut surface = DesignSurface::default();
    let a = upload(&mut surface, "blob:a");
    let b = upload(&mut surface, "blob:b");
    assert_eq!(surface.selected(), Some(b));

    assert!(surface.apply_intent(Intent::Delete(b)));
    assert_eq!(surface.selected(), None);
    assert_eq!(surface.elements().len(), 1);

    // Deleting an unselected element leaves the selection alone.
    surface.select(Some(a));
    let c = upload(&mut surface, "blob:c");
    surface.select(Some(a));
    assert!(surface.delete(c));
    assert_eq!(surface.selected(), Some(a));
    assert!(!surface.delete(c));
}

#[test]
fn rotation_reclamps_element_at_edge() {
    let mut surface = DesignSurface::default();
    let id = upload(&mut surface, "blob:edge");
    surface.update(id, &ElementUpdate::moved_to(130.0, 270.0));
    surface.set_rotation(id, 90.0);
    let el = surface.get(id).unwrap();
    // Turned upright, the 80-unit vertical span eats 20 units of y range.
    assert_eq!((el.x, el.y), (130.0, 250.0));
    assert!(Placement::of(el).fits(surface.zone()));
}

// ─── Guarded updates ────────────────────────────────────────────────────

#[test]
fn non_finite_size_is_rejected() {
    let mut surface = DesignSurface::default();
    let id = upload(&mut surface, "blob:inf");
    let before = surface.get(id).unwrap().clone();
    assert!(!surface.update(id, &ElementUpdate::resized_to(f32::INFINITY, f32::INFINITY)));
    assert!(!surface.update(id, &ElementUpdate::resized_to(f32::NAN, 80.0)));
    assert_eq!(surface.get(id).unwrap(), &before);
}

#[test]
fn negative_or_undersized_size_is_rejected() {
    let mut surface = DesignSurface::default();
    let id = upload(&mut surface, "blob:neg");
    assert!(!surface.update(id, &ElementUpdate::resized_to(-10.0, -50.0)));
    // Floor is 15% of the original 600 width: 90.
    assert!(!surface.update(id, &ElementUpdate::resized_to(60.0, 40.0)));
    let el = surface.get(id).unwrap();
    assert_eq!((el.width, el.height), (120.0, 80.0));
}

#[test]
fn size_off_original_aspect_is_rejected() {
    let mut surface = DesignSurface::default();
    let id = upload(&mut surface, "blob:aspect");
    assert!(!surface.update(id, &ElementUpdate::resized_to(100.0, 100.0)));
    // The position half of a rejected update is dropped too.
    let mut update = ElementUpdate::resized_to(10.0, 100.0);
    update.position = Some((0.0, 0.0));
    assert!(!surface.update(id, &update));
    assert_eq!((surface.get(id).unwrap().x, surface.get(id).unwrap().y), (65.0, 135.0));

    assert!(surface.update(id, &ElementUpdate::resized_to(150.0, 100.0)));
    let el = surface.get(id).unwrap();
    assert_eq!((el.width, el.height), (150.0, 100.0));
}

#[test]
fn re_adding_an_existing_id_gets_a_fresh_one() {
    let mut surface = DesignSurface::default();
    let id = upload(&mut surface, "blob:twice");
    let clone = surface.get(id).unwrap().clone();

    let new_id = surface.add_element(clone);
    assert!(new_id != id);
    assert_eq!(surface.selected(), Some(new_id));
    assert_eq!(surface.elements().len(), 2);

    assert!(surface.delete(id));
    let ids: Vec<_> = surface.elements().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![new_id]);
}

#[test]
fn views_keep_separate_elements() {
    let mut surface = DesignSurface::default();
    let front = upload(&mut surface, "blob:front");
    surface.set_view(View::Back);
    let back = upload(&mut surface, "blob:back");

    let ids: Vec<_> = surface.elements_in_view().map(|e| e.id).collect();
    assert_eq!(ids, vec![back]);
    assert_eq!(surface.elements().len(), 2);

    surface.set_view(View::Front);
    assert_eq!(surface.selected(), None);
    let ids: Vec<_> = surface.elements_in_view().map(|e| e.id).collect();
    assert_eq!(ids, vec![front]);
}

#[test]
fn hit_test_ignores_other_view() {
    let mut surface = DesignSurface::default();
    let id = upload(&mut surface, "blob:hit");
    assert_eq!(surface.hit_test(100.0, 170.0).map(|h| h.id), Some(id));
    surface.set_view(View::Back);
    assert_eq!(surface.hit_test(100.0, 170.0), None);
}

#[test]
fn designer_commands_act_on_selection() {
    init_logging();
    let mut designer = Designer::default();
    assert!(!designer.delete_selected());
    assert_eq!(designer.duplicate_selected(), None);
    assert!(!designer.set_rotation(45.0));

    let id = upload(&mut designer.surface, "blob:cmd");
    assert!(designer.set_rotation(-45.0));
    assert_eq!(designer.surface.get(id).unwrap().rotation, -45.0);
    assert!(designer.reset_rotation());
    assert_eq!(designer.surface.get(id).unwrap().rotation, 0.0);

    let copy = designer.duplicate_selected().unwrap();
    assert!(designer.delete_selected());
    assert!(designer.surface.get(copy).is_none());
    assert!(designer.surface.get(id).is_some());
}

#[test]
fn garment_color_is_independent_of_elements() {
    let mut designer = Designer::default();
    let id = upload(&mut designer.surface, "blob:color");
    assert!(designer.set_garment_color(GarmentColor::Blue));
    assert_eq!(designer.surface.garment_color(), GarmentColor::Blue);
    assert_eq!(designer.surface.selected(), Some(id));
}

#[test]
fn rejected_upload_changes_nothing() {
    init_logging();
    let mut surface = DesignSurface::default();
    assert_eq!(
        surface.ingest_bytes("blob:doc", "application/pdf", b"%PDF-1.7"),
        Err(IngestError::NotAnImage("application/pdf".into()))
    );
    assert!(matches!(
        surface.ingest_bytes("blob:junk", "image/png", b"not a png"),
        Err(IngestError::Decode(_))
    ));
    assert!(surface.elements().is_empty());
    assert_eq!(surface.selected(), None);
}
