//! Newsletter and contact forms.
//!
//! Both forms only acknowledge a submission and reset themselves; nothing
//! is sent anywhere.
use std::sync::LazyLock;

use log::info;
use regex::Regex;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("Invalid email regex")
});

/// Outcome of submitting a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission
{
    /// Accepted; the message acknowledges it and the form was cleared
    Accepted(String),
    /// Refused; the form keeps its contents
    Rejected(String),
}

impl Submission
{
    /// The text to show the user.
    #[must_use]
    pub fn message(&self) -> &str
    {
        match self
        {
            Self::Accepted(message) | Self::Rejected(message) => message,
        }
    }
}

/// Whether `email` looks like an address.
#[must_use]
pub fn is_valid_email(email: &str) -> bool
{
    EMAIL_REGEX.is_match(email.trim())
}

/// Newsletter signup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsletterForm
{
    /// Address typed so far
    pub email: String,
}

impl NewsletterForm
{
    /// Submits the form.
    pub fn submit(&mut self) -> Submission
    {
        let email = self.email.trim().to_string();

        if !is_valid_email(&email)
        {
            return Submission::Rejected(String::from("Please enter a valid email address"));
        }

        info!("Newsletter subscription for {email}");
        self.email.clear();

        Submission::Accepted(format!("Thank you for subscribing with email: {email}"))
    }
}

/// Fields of the contact form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContactField
{
    /// Sender name
    #[default]
    Name,
    /// Reply address
    Email,
    /// Subject line
    Subject,
    /// Message body
    Message,
}

impl ContactField
{
    /// The field after this one, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self
    {
        match self
        {
            Self::Name => Self::Email,
            Self::Email => Self::Subject,
            Self::Subject => Self::Message,
            Self::Message => Self::Name,
        }
    }

    /// Label shown next to the field.
    #[must_use]
    pub const fn label(self) -> &'static str
    {
        match self
        {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Subject => "Subject",
            Self::Message => "Message",
        }
    }
}

/// Contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm
{
    /// Sender name
    pub name: String,
    /// Reply address
    pub email: String,
    /// Subject line
    pub subject: String,
    /// Message body
    pub message: String,
    /// Field receiving input
    pub focus: ContactField,
}

impl ContactForm
{
    /// Mutable access to the text of `field`.
    pub const fn field_mut(&mut self, field: ContactField) -> &mut String
    {
        match field
        {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Subject => &mut self.subject,
            ContactField::Message => &mut self.message,
        }
    }

    /// Text of `field`.
    #[must_use]
    pub const fn field(&self, field: ContactField) -> &String
    {
        match field
        {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Subject => &self.subject,
            ContactField::Message => &self.message,
        }
    }

    /// Types a character into the focused field.
    pub fn push(&mut self, ch: char)
    {
        self.field_mut(self.focus).push(ch);
    }

    /// Deletes the last character of the focused field.
    pub fn pop(&mut self)
    {
        self.field_mut(self.focus).pop();
    }

    /// Moves focus to the next field.
    pub const fn focus_next(&mut self)
    {
        self.focus = self.focus.next();
    }

    /// Submits the form.
    ///
    /// Name, message and a well-formed email are required. An accepted
    /// submission is logged and the form is reset.
    pub fn submit(&mut self) -> Submission
    {
        if self.name.trim().is_empty() || self.message.trim().is_empty()
        {
            return Submission::Rejected(String::from("Name and message are required"));
        }

        if !is_valid_email(&self.email)
        {
            return Submission::Rejected(String::from("Please enter a valid email address"));
        }

        info!(
            "Form submitted: name={:?} email={:?} subject={:?} message={:?}",
            self.name.trim(),
            self.email.trim(),
            self.subject.trim(),
            self.message.trim()
        );

        *self = Self::default();

        Submission::Accepted(String::from(
            "Thank you for your message! We will get back to you soon.",
        ))
    }
}
