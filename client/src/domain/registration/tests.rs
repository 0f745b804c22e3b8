//! Tests for the product registration steps.

use super::*;
use crate::domain::PriceUnit;
use chrono::{NaiveTime, Weekday};
use rstest::{fixture, rstest};

fn slot(weekday: Weekday, start: u32, end: u32) -> AvailabilitySlot {
    AvailabilitySlot {
        weekday,
        start: NaiveTime::from_hms_opt(start, 0, 0).expect("valid start"),
        end: NaiveTime::from_hms_opt(end, 0, 0).expect("valid end"),
    }
}

fn details(name: &str, description: &str) -> ProductDetails {
    ProductDetails {
        name: name.to_owned(),
        description: description.to_owned(),
        category: Category::Equipment,
    }
}

fn price(amount_cents: u64) -> Price {
    Price {
        amount_cents,
        unit: PriceUnit::Day,
    }
}

#[fixture]
fn at_media() -> ProductRegistration {
    let mut form = ProductRegistration::new();
    form.submit_details(details("  Thermal camera ", "FLIR, with tripod"))
        .expect("details accepted");
    form.submit_pricing(price(12_000)).expect("pricing accepted");
    form.submit_availability(vec![slot(Weekday::Mon, 8, 12), slot(Weekday::Mon, 13, 17)])
        .expect("availability accepted");
    form
}

#[rstest]
fn happy_path_produces_trimmed_draft_and_image(mut at_media: ProductRegistration) {
    let image = Attachment::new("camera.jpg", "image/jpeg", vec![1, 2, 3]);
    let step = at_media.submit_media(Some(image.clone())).expect("media accepted");
    assert_eq!(step, RegistrationStep::Review);

    let (draft, attached) = at_media.finish().expect("finish on review");
    assert_eq!(draft.name, "Thermal camera");
    assert_eq!(draft.price, price(12_000));
    assert_eq!(draft.availability.len(), 2);
    assert_eq!(attached, Some(image));
}

#[rstest]
fn back_keeps_entered_data(mut at_media: ProductRegistration) {
    assert_eq!(at_media.back(), Ok(RegistrationStep::Availability));
    assert_eq!(at_media.back(), Ok(RegistrationStep::Pricing));
    assert_eq!(at_media.price(), Some(price(12_000)));

    at_media
        .submit_pricing(price(15_000))
        .expect("pricing resubmitted");
    assert_eq!(at_media.step(), RegistrationStep::Availability);
    assert_eq!(at_media.availability().len(), 2);
}

#[test]
fn back_on_first_step_is_refused() {
    let mut form = ProductRegistration::default();
    assert_eq!(form.back(), Err(RegistrationError::AtFirstStep));
}

#[test]
fn out_of_order_input_is_refused() {
    let mut form = ProductRegistration::new();
    let error = form.submit_pricing(price(100)).expect_err("wrong step");
    assert_eq!(
        error,
        RegistrationError::WrongStep {
            current: RegistrationStep::Details,
            submitted: RegistrationStep::Pricing,
        }
    );
    assert!(form.clone().finish().is_err());
    assert_eq!(form.step(), RegistrationStep::Details);
}

#[rstest]
#[case::too_short(details("ab", "desc"), RegistrationError::NameLength { min: 3, max: 120 })]
#[case::blank_padding(details("  ab  ", "desc"), RegistrationError::NameLength { min: 3, max: 120 })]
#[case::too_long(details(&"x".repeat(121), "desc"), RegistrationError::NameLength { min: 3, max: 120 })]
#[case::blank_description(details("Camera", "   "), RegistrationError::EmptyDescription)]
fn details_are_validated(#[case] input: ProductDetails, #[case] expected: RegistrationError) {
    let mut form = ProductRegistration::new();
    assert_eq!(form.submit_details(input), Err(expected));
    assert_eq!(form.step(), RegistrationStep::Details);
    assert!(form.details().is_none());
}

#[test]
fn zero_price_is_refused() {
    let mut form = ProductRegistration::new();
    form.submit_details(details("Camera", "desc"))
        .expect("details accepted");
    assert_eq!(form.submit_pricing(price(0)), Err(RegistrationError::ZeroPrice));
}

#[rstest]
#[case::empty(vec![], RegistrationError::NoAvailability)]
#[case::inverted(
    vec![slot(Weekday::Mon, 8, 12), slot(Weekday::Tue, 12, 8)],
    RegistrationError::MalformedSlot { index: 1 }
)]
#[case::overlap(
    vec![slot(Weekday::Mon, 8, 12), slot(Weekday::Tue, 8, 12), slot(Weekday::Mon, 11, 13)],
    RegistrationError::OverlappingSlots { first: 0, second: 2 }
)]
fn availability_is_validated(
    #[case] slots: Vec<AvailabilitySlot>,
    #[case] expected: RegistrationError,
) {
    let mut form = ProductRegistration::new();
    form.submit_details(details("Camera", "desc"))
        .expect("details accepted");
    form.submit_pricing(price(100)).expect("pricing accepted");

    assert_eq!(form.submit_availability(slots), Err(expected));
    assert_eq!(form.step(), RegistrationStep::Availability);
}

#[rstest]
fn non_image_media_is_refused(mut at_media: ProductRegistration) {
    let pdf = Attachment::new("terms.pdf", "application/pdf", vec![1]);
    let error = at_media.submit_media(Some(pdf)).expect_err("not an image");
    assert!(matches!(
        error,
        RegistrationError::Image(AttachmentValidationError::NotAnImage { .. })
    ));
    assert!(at_media.image().is_none());
}
