use crate::types::EmailMessage;

/// Alert sent to the operator mailbox when a guest submits a booking.
/// `details` is the pretty-printed booking as submitted.
pub fn new_booking_alert(guest_name: &str, details: &str) -> EmailMessage {
    EmailMessage::new(format!("New Booking From {}", guest_name), details)
}

/// Acknowledgement sent to a guest who left an email address on their booking.
pub fn guest_welcome(guest_name: &str, business_name: &str) -> EmailMessage {
    let name = if guest_name.trim().is_empty() {
        "Guest"
    } else {
        guest_name.trim()
    };

    EmailMessage::new(
        format!("Welcome to {}", business_name),
        format!(
            "Hello {},\n\nThanks for reaching out! A member of our team will get back to you shortly. \
             In the meantime, if you need anything else, feel free to let us know. \
             You can also contact us directly for any urgent queries.\n\nBest regards,\n{} Team",
            name, business_name
        ),
    )
}

/// One-time code for the admin password reset.
pub fn admin_reset_code(code: &str, valid_minutes: i64) -> EmailMessage {
    EmailMessage::new(
        "Admin Password Reset OTP",
        format!(
            "Your OTP for resetting admin password is: {}. It expires in {} minutes.",
            code, valid_minutes
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_alert_names_guest() {
        let message = new_booking_alert("Asha", "{\n  \"name\": \"Asha\"\n}");
        assert_eq!(message.subject, "New Booking From Asha");
        assert!(message.body.contains("\"name\": \"Asha\""));
    }

    #[test]
    fn test_guest_welcome_falls_back_to_guest() {
        let message = guest_welcome("   ", "Starry Mountain");
        assert_eq!(message.subject, "Welcome to Starry Mountain");
        assert!(message.body.starts_with("Hello Guest,"));
        assert!(message.body.ends_with("Starry Mountain Team"));
    }

    #[test]
    fn test_reset_code_mentions_code_and_expiry() {
        let message = admin_reset_code("123456", 5);
        assert!(message.body.contains("123456"));
        assert!(message.body.contains("5 minutes"));
    }
}
