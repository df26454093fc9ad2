use std::sync::LazyLock;

use regex::Regex;
use tracing::{info, warn};

use crate::booking::email::{
    BookingEmailRequest, BuddySummary, EmailClient, EmailError, TripSummary,
};
use crate::booking::pdf::PdfError;
use crate::catalog::Catalog;
use crate::error::AppError;
use crate::models::booking::{BookingConfirmation, BookingSelection, ContactInfo};

pub mod email;
pub mod pdf;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Checks the traveler's contact details and returns them normalized:
/// name trimmed, email lowercased.
pub fn validate_contact(name: &str, email: &str) -> Result<ContactInfo, AppError> {
    let name = name.trim();
    let len = name.chars().count();
    if !(2..=100).contains(&len) {
        return Err(AppError::Validation {
            field: "name",
            message: "name must be between 2 and 100 characters".into(),
        });
    }
    if !name.chars().all(|c| c.is_alphabetic() || c.is_whitespace()) {
        return Err(AppError::Validation {
            field: "name",
            message: "name may only contain letters and spaces".into(),
        });
    }

    let email = email.trim();
    if !EMAIL_RE.is_match(email) {
        return Err(AppError::Validation {
            field: "email",
            message: "email address is not valid".into(),
        });
    }

    Ok(ContactInfo {
        name: name.to_owned(),
        email: email.to_lowercase(),
    })
}

/// Folds the PDF and email outcomes into the response the traveler sees.
/// Neither failure blocks the booking: it confirms anyway, with the
/// missing piece flagged. The rendered bytes come back separately so the
/// caller can stash them for the download endpoint.
fn assemble_confirmation(
    pdf: Result<Vec<u8>, PdfError>,
    email: Result<(), EmailError>,
) -> (BookingConfirmation, Option<Vec<u8>>) {
    let (pdf_bytes, pdf_warning) = match pdf {
        Ok(bytes) => (Some(bytes), None),
        Err(err) => {
            warn!(error = %err, "itinerary rendering failed, confirming without it");
            (None, Some("itinerary could not be generated".to_owned()))
        }
    };

    let (email_sent, email_warning) = match email {
        Ok(()) => (true, None),
        Err(EmailError::NotConfigured) => (
            false,
            Some("confirmation email is not configured".to_owned()),
        ),
        Err(EmailError::DomainNotVerified) => (
            false,
            Some(
                "confirmation email requires a verified sending domain; verify one with the email provider".to_owned(),
            ),
        ),
        Err(err) => {
            warn!(error = %err, "confirmation email failed");
            (
                false,
                Some("confirmation email could not be sent".to_owned()),
            )
        }
    };

    let warning = match (pdf_warning, email_warning) {
        (Some(p), Some(e)) => Some(format!("{p}; {e}")),
        (Some(p), None) => Some(p),
        (None, Some(e)) => Some(e),
        (None, None) => None,
    };

    (
        BookingConfirmation {
            confirmed: true,
            pdf_available: pdf_bytes.is_some(),
            email_sent,
            warning,
        },
        pdf_bytes,
    )
}

/// Runs the confirmation pipeline for a selection that has finished the
/// quiz, buddy, and destination steps: render the itinerary, attempt the
/// email, and report what worked.
pub async fn confirm_booking(
    catalog: &Catalog,
    email_client: &EmailClient,
    selection: &BookingSelection,
    contact: &ContactInfo,
) -> Result<(BookingConfirmation, Option<Vec<u8>>), AppError> {
    let chosen = selection.buddy.as_ref().ok_or(AppError::MissingBuddy {
        selection: selection.id,
    })?;
    let destination_id = selection
        .destination_id
        .ok_or(AppError::MissingDestination {
            selection: selection.id,
        })?;

    let buddy = catalog
        .buddy(chosen.buddy_id)
        .ok_or_else(|| AppError::NotFound(format!("buddy {} not found", chosen.buddy_id)))?;
    let destination = catalog
        .destination(destination_id)
        .ok_or_else(|| AppError::NotFound(format!("destination {destination_id} not found")))?;

    let pdf = pdf::render_itinerary(destination, buddy, chosen.score, contact);

    let email = email_client
        .send_booking_email(&BookingEmailRequest {
            user_email: contact.email.clone(),
            user_name: contact.name.clone(),
            trip: TripSummary {
                name: destination.name.clone(),
                duration: destination.duration.clone(),
                approximate_cost: destination.approximate_cost.clone(),
                description: destination.description.clone(),
                trip_highlights: destination.trip_highlights.clone(),
            },
            buddy: BuddySummary {
                name: buddy.name.clone(),
                age: buddy.age,
                location: buddy.location.clone(),
                bio: buddy.bio.clone(),
                interests: buddy.interests.clone(),
                match_percentage: chosen.score,
            },
        })
        .await;

    let (confirmation, pdf_bytes) = assemble_confirmation(pdf, email);
    info!(
        selection_id = %selection.id,
        destination = %destination.name,
        email_sent = confirmation.email_sent,
        "booking confirmed"
    );
    Ok((confirmation, pdf_bytes))
}

#[cfg(test)]
mod tests {
    use super::{assemble_confirmation, validate_contact};
    use crate::booking::email::EmailError;
    use crate::error::AppError;

    #[test]
    fn contact_is_normalized() {
        let contact = validate_contact("  Jordan Lee ", "Jordan.Lee@Example.COM").unwrap();
        assert_eq!(contact.name, "Jordan Lee");
        assert_eq!(contact.email, "jordan.lee@example.com");
    }

    #[test]
    fn short_and_non_alphabetic_names_are_rejected() {
        for bad in ["J", "Jordan99", "a b c!"] {
            let err = validate_contact(bad, "ok@example.com").unwrap_err();
            assert!(matches!(err, AppError::Validation { field: "name", .. }), "{bad}");
        }
        // Unicode letters are fine.
        assert!(validate_contact("José García", "ok@example.com").is_ok());
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for bad in ["plain", "no@tld", "two@@example.com", "spa ce@example.com"] {
            let err = validate_contact("Jordan", bad).unwrap_err();
            assert!(matches!(err, AppError::Validation { field: "email", .. }), "{bad}");
        }
    }

    #[test]
    fn email_failure_still_confirms() {
        let (confirmation, bytes) =
            assemble_confirmation(Ok(b"%PDF-1.3".to_vec()), Err(EmailError::NotConfigured));
        assert!(confirmation.confirmed);
        assert!(confirmation.pdf_available);
        assert!(!confirmation.email_sent);
        assert!(confirmation.warning.is_some());
        assert!(bytes.is_some());
    }

    #[test]
    fn pdf_failure_still_confirms_without_the_download() {
        let (confirmation, bytes) = assemble_confirmation(
            Err(crate::booking::pdf::PdfError::Generation("font table".into())),
            Ok(()),
        );
        assert!(confirmation.confirmed);
        assert!(!confirmation.pdf_available);
        assert!(confirmation.email_sent);
        assert!(confirmation.warning.unwrap().contains("itinerary"));
        assert!(bytes.is_none());
    }

    #[test]
    fn domain_not_verified_gets_its_own_warning() {
        let (domain, _) = assemble_confirmation(
            Ok(b"%PDF-1.3".to_vec()),
            Err(EmailError::DomainNotVerified),
        );
        let (generic, _) = assemble_confirmation(
            Ok(b"%PDF-1.3".to_vec()),
            Err(EmailError::Provider {
                status: 500,
                message: "upstream broke".into(),
            }),
        );

        let domain_warning = domain.warning.unwrap();
        assert!(domain_warning.contains("verified sending domain"));
        assert_ne!(domain_warning, generic.warning.unwrap());
        assert!(domain.confirmed && generic.confirmed);
    }

    #[test]
    fn everything_working_has_no_warning() {
        let (confirmation, bytes) = assemble_confirmation(Ok(b"%PDF-1.3".to_vec()), Ok(()));
        assert!(confirmation.confirmed);
        assert!(confirmation.email_sent);
        assert!(confirmation.warning.is_none());
        assert!(bytes.is_some());
    }
}
