//! HTML presentation layer.
//!
//! Pages are assembled in code; stored message fields are escaped before
//! they reach the markup.

use crate::models::MessageRecord;

/// Escape text for safe interpolation into HTML
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render the landing page with the send-message form
#[must_use]
pub fn landing_page() -> String {
    r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>SMS Relay</title>
</head>
<body>
<h1>Send a message</h1>
<form id="send-form">
  <label>Phone number <input name="phone_number" type="tel" placeholder="+15551234567"></label><br>
  <label>Your name <input name="sender_name" type="text"></label><br>
  <label>Message <textarea name="message"></textarea></label><br>
  <button type="submit">Send</button>
</form>
<p id="result"></p>
<p><a href="/conversations">View conversations</a></p>
<script>
document.getElementById('send-form').addEventListener('submit', async (event) => {
  event.preventDefault();
  const form = new FormData(event.target);
  const response = await fetch('/send-sms', {
    method: 'POST',
    headers: {'Content-Type': 'application/json'},
    body: JSON.stringify(Object.fromEntries(form)),
  });
  const data = await response.json();
  document.getElementById('result').textContent =
    data.success ? 'Sent! sid: ' + data.message_sid : 'Error: ' + data.error;
});
</script>
</body>
</html>
"#
    .to_string()
}

/// Render the conversation view over the stored records
#[must_use]
pub fn conversation_page(messages: &[MessageRecord]) -> String {
    let mut rows = String::new();
    for message in messages {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td><pre>{}</pre></td><td>{}</td></tr>\n",
            escape_html(&message.sender_name),
            escape_html(&message.phone_number),
            escape_html(&message.message_body),
            escape_html(&message.date),
        ));
    }

    let table = if messages.is_empty() {
        "<p>No messages yet.</p>".to_string()
    } else {
        format!(
            "<table>\n<tr><th>Sender</th><th>Phone</th><th>Message</th><th>Date</th></tr>\n{rows}</table>"
        )
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Conversations</title>
</head>
<body>
<h1>Conversations</h1>
{table}
<p><a href="/">Send a message</a></p>
</body>
</html>
"#
    )
}
