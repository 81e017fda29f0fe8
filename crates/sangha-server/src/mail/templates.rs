//! Transactional email bodies. Plain HTML, no external assets.

pub fn approval(club_name: &str, name: &str, username: &str, password: &str) -> String {
    format!(
        r#"<div style="font-family: sans-serif; max-width: 600px; margin: 0 auto;">
  <h2>Welcome to the {club_name} family</h2>
  <p>Dear <strong>{name}</strong>,</p>
  <p>We are pleased to inform you that your membership application has been <strong>approved</strong>.</p>
  <p>You can now access the member portal using the credentials below:</p>
  <pre style="background: #f4f4f4; padding: 12px; border-radius: 6px;">Username: {username}
Password: {password}</pre>
  <p>Please keep these credentials safe. We look forward to your active participation.</p>
</div>"#
    )
}

pub fn rejection(club_name: &str, name: &str) -> String {
    format!(
        r#"<div style="font-family: sans-serif; max-width: 600px; margin: 0 auto;">
  <h2>Application status update</h2>
  <p>Dear <strong>{name}</strong>,</p>
  <p>Thank you for your interest in joining {club_name}.</p>
  <p>After careful review by our executive committee, we regret to inform you that your
  application has <strong>not been approved</strong> at this time.</p>
  <p>You are welcome to apply again in the future or contact the club office for details.</p>
</div>"#
    )
}

pub fn invitation(club_name: &str, name: &str, username: &str, password: &str) -> String {
    format!(
        r#"<div style="font-family: sans-serif; max-width: 600px; margin: 0 auto;">
  <h2>Special membership invitation</h2>
  <p>Dear <strong>{name}</strong>,</p>
  <p>You have been invited to join <strong>{club_name}</strong> as a member.
  Your account is already active:</p>
  <pre style="background: #f4f4f4; padding: 12px; border-radius: 6px;">Username: {username}
Password: {password}</pre>
  <p>Log in to the member portal to complete your profile.</p>
</div>"#
    )
}

pub fn otp(club_name: &str, name: &str, code: &str) -> String {
    format!(
        r#"<div style="font-family: sans-serif; max-width: 600px; margin: 0 auto;">
  <h2>Password reset code</h2>
  <p>Dear <strong>{name}</strong>,</p>
  <p>Your one-time code for resetting your {club_name} portal password is:</p>
  <pre style="background: #f4f4f4; padding: 12px; border-radius: 6px; font-size: 20px;">{code}</pre>
  <p>The code expires in 10 minutes. If you did not request this, you can ignore this email.</p>
</div>"#
    )
}

pub fn admin_notification(name: &str, phone: &str, address: &str, blood_group: &str) -> String {
    format!(
        "New member application received.\n\n\
         Name: {name}\n\
         Phone: {phone}\n\
         Address: {address}\n\
         Blood Group: {blood_group}\n\n\
         Log in to the dashboard to review it."
    )
}
