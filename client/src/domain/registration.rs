//! Multi-step product registration.
//!
//! The registration form walks an institution through
//! `Details -> Pricing -> Availability -> Media -> Review`. Each step only
//! accepts input while it is the current step, validates it, and advances.
//! Going back keeps everything entered so far. Finishing on `Review` yields
//! the create payload and the optional product image.

use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use super::{Attachment, AttachmentValidationError, AvailabilitySlot, Category, Price, ProductDraft};

/// Shortest accepted product name, in characters.
pub const PRODUCT_NAME_MIN: usize = 3;
/// Longest accepted product name, in characters.
pub const PRODUCT_NAME_MAX: usize = 120;

/// Steps of the registration form, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegistrationStep {
    /// Name, description and category.
    Details,
    /// Price and price unit.
    Pricing,
    /// Weekly availability windows.
    Availability,
    /// Optional product image.
    Media,
    /// Final confirmation.
    Review,
}

impl RegistrationStep {
    fn next(self) -> Self {
        match self {
            Self::Details => Self::Pricing,
            Self::Pricing => Self::Availability,
            Self::Availability => Self::Media,
            Self::Media | Self::Review => Self::Review,
        }
    }

    fn previous(self) -> Option<Self> {
        match self {
            Self::Details => None,
            Self::Pricing => Some(Self::Details),
            Self::Availability => Some(Self::Pricing),
            Self::Media => Some(Self::Availability),
            Self::Review => Some(Self::Media),
        }
    }
}

/// Input of the first step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetails {
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Product kind.
    pub category: Category,
}

/// Reasons a step refuses its input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// Input was submitted for a step other than the current one.
    #[error("expected input for the {current:?} step, got {submitted:?}")]
    WrongStep {
        /// Step the form is on.
        current: RegistrationStep,
        /// Step the input belongs to.
        submitted: RegistrationStep,
    },
    /// `back` was called on the first step.
    #[error("already at the first step")]
    AtFirstStep,
    /// The product name is too short or too long.
    #[error("product name must be between {min} and {max} characters")]
    NameLength {
        /// Minimum length.
        min: usize,
        /// Maximum length.
        max: usize,
    },
    /// The description was blank.
    #[error("description must not be empty")]
    EmptyDescription,
    /// The price was zero.
    #[error("price must be greater than zero")]
    ZeroPrice,
    /// No availability window was given.
    #[error("at least one availability window is required")]
    NoAvailability,
    /// A window ends before it starts.
    #[error("availability window {index} must end after it starts")]
    MalformedSlot {
        /// Position of the window in the submitted list.
        index: usize,
    },
    /// Two windows overlap on the same weekday.
    #[error("availability windows {first} and {second} overlap")]
    OverlappingSlots {
        /// Position of the earlier window.
        first: usize,
        /// Position of the later window.
        second: usize,
    },
    /// The product image was refused.
    #[error(transparent)]
    Image(#[from] AttachmentValidationError),
}

/// State of one product registration form.
///
/// # Examples
/// ```
/// use chrono::{NaiveTime, Weekday};
/// use client::domain::{
///     AvailabilitySlot, Category, Price, PriceUnit, ProductDetails, ProductRegistration,
///     RegistrationStep,
/// };
///
/// let mut form = ProductRegistration::new();
/// form.submit_details(ProductDetails {
///     name: "Recording studio".to_owned(),
///     description: "Soundproofed room".to_owned(),
///     category: Category::Space,
/// })?;
/// form.submit_pricing(Price { amount_cents: 8_000, unit: PriceUnit::Hour })?;
/// form.submit_availability(vec![AvailabilitySlot {
///     weekday: Weekday::Sat,
///     start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
///     end: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or_default(),
/// }])?;
/// assert_eq!(form.submit_media(None)?, RegistrationStep::Review);
///
/// let (draft, image) = form.finish()?;
/// assert_eq!(draft.name, "Recording studio");
/// assert!(image.is_none());
/// # Ok::<(), client::domain::RegistrationError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ProductRegistration {
    draft_id: Uuid,
    step: RegistrationStep,
    details: Option<ProductDetails>,
    price: Option<Price>,
    availability: Vec<AvailabilitySlot>,
    image: Option<Attachment>,
}

impl ProductRegistration {
    /// Start a form on the `Details` step.
    pub fn new() -> Self {
        Self {
            draft_id: Uuid::new_v4(),
            step: RegistrationStep::Details,
            details: None,
            price: None,
            availability: Vec::new(),
            image: None,
        }
    }

    /// Correlation id used in logs for this form.
    pub fn draft_id(&self) -> Uuid {
        self.draft_id
    }

    /// Current step.
    pub fn step(&self) -> RegistrationStep {
        self.step
    }

    /// Details entered so far.
    pub fn details(&self) -> Option<&ProductDetails> {
        self.details.as_ref()
    }

    /// Price entered so far.
    pub fn price(&self) -> Option<Price> {
        self.price
    }

    /// Availability windows entered so far.
    pub fn availability(&self) -> &[AvailabilitySlot] {
        &self.availability
    }

    /// Image selected so far.
    pub fn image(&self) -> Option<&Attachment> {
        self.image.as_ref()
    }

    /// Submit the `Details` step.
    pub fn submit_details(
        &mut self,
        details: ProductDetails,
    ) -> Result<RegistrationStep, RegistrationError> {
        self.expect_step(RegistrationStep::Details)?;
        let name = details.name.trim();
        let length = name.chars().count();
        if !(PRODUCT_NAME_MIN..=PRODUCT_NAME_MAX).contains(&length) {
            return Err(RegistrationError::NameLength {
                min: PRODUCT_NAME_MIN,
                max: PRODUCT_NAME_MAX,
            });
        }
        if details.description.trim().is_empty() {
            return Err(RegistrationError::EmptyDescription);
        }
        self.details = Some(ProductDetails {
            name: name.to_owned(),
            description: details.description.trim().to_owned(),
            category: details.category,
        });
        Ok(self.advance())
    }

    /// Submit the `Pricing` step.
    pub fn submit_pricing(&mut self, price: Price) -> Result<RegistrationStep, RegistrationError> {
        self.expect_step(RegistrationStep::Pricing)?;
        if price.amount_cents == 0 {
            return Err(RegistrationError::ZeroPrice);
        }
        self.price = Some(price);
        Ok(self.advance())
    }

    /// Submit the `Availability` step.
    pub fn submit_availability(
        &mut self,
        slots: Vec<AvailabilitySlot>,
    ) -> Result<RegistrationStep, RegistrationError> {
        self.expect_step(RegistrationStep::Availability)?;
        validate_availability(&slots)?;
        self.availability = slots;
        Ok(self.advance())
    }

    /// Submit the `Media` step; the image is optional.
    pub fn submit_media(
        &mut self,
        image: Option<Attachment>,
    ) -> Result<RegistrationStep, RegistrationError> {
        self.expect_step(RegistrationStep::Media)?;
        if let Some(image) = &image {
            image.validate_image()?;
        }
        self.image = image;
        Ok(self.advance())
    }

    /// Return to the previous step, keeping entered data.
    pub fn back(&mut self) -> Result<RegistrationStep, RegistrationError> {
        let previous = self.step.previous().ok_or(RegistrationError::AtFirstStep)?;
        self.step = previous;
        Ok(previous)
    }

    /// Produce the create payload and optional image from the `Review` step.
    pub fn finish(self) -> Result<(ProductDraft, Option<Attachment>), RegistrationError> {
        self.expect_step(RegistrationStep::Review)?;
        let (Some(details), Some(price)) = (self.details, self.price) else {
            // Review is only reachable after Details and Pricing were accepted.
            return Err(RegistrationError::WrongStep {
                current: RegistrationStep::Review,
                submitted: RegistrationStep::Details,
            });
        };
        debug!(draft_id = %self.draft_id, "product registration finished");
        let draft = ProductDraft {
            name: details.name,
            description: details.description,
            category: details.category,
            price,
            availability: self.availability,
        };
        Ok((draft, self.image))
    }

    fn expect_step(&self, submitted: RegistrationStep) -> Result<(), RegistrationError> {
        if self.step == submitted {
            Ok(())
        } else {
            Err(RegistrationError::WrongStep {
                current: self.step,
                submitted,
            })
        }
    }

    fn advance(&mut self) -> RegistrationStep {
        let completed = self.step;
        self.step = completed.next();
        debug!(
            draft_id = %self.draft_id,
            completed = ?completed,
            next = ?self.step,
            "product registration step accepted"
        );
        self.step
    }
}

impl Default for ProductRegistration {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_availability(slots: &[AvailabilitySlot]) -> Result<(), RegistrationError> {
    if slots.is_empty() {
        return Err(RegistrationError::NoAvailability);
    }
    if let Some(index) = slots.iter().position(|slot| !slot.is_well_formed()) {
        return Err(RegistrationError::MalformedSlot { index });
    }
    for (first, slot) in slots.iter().enumerate() {
        let overlap = slots
            .iter()
            .enumerate()
            .skip(first + 1)
            .find(|(_, other)| slot.overlaps(other));
        if let Some((second, _)) = overlap {
            return Err(RegistrationError::OverlappingSlots { first, second });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests;
