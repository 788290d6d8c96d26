//! Field registry for the "send mail" form.

use super::rules::{FieldDefinition, FieldRegistry, Rule};

/// Registry id used by the send-mail endpoint.
pub const MAIL_SEND_REGISTRY_ID: &str = "mail_send";

/// Maximum length of an address list field.
pub const ADDRESS_MAX_LENGTH: usize = 1000;

/// Maximum length of the subject line.
pub const SUBJECT_MAX_LENGTH: usize = 255;

/// Maximum length of the message body.
pub const BODY_MAX_LENGTH: usize = 4000;

/// The inputs of the send-mail form, in the order they are validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailSendField {
    To,
    ReplyTo,
    Cc,
    Bcc,
    Subject,
    Body,
    IsHtml,
}

impl MailSendField {
    pub const ALL: [MailSendField; 7] = [
        MailSendField::To,
        MailSendField::ReplyTo,
        MailSendField::Cc,
        MailSendField::Bcc,
        MailSendField::Subject,
        MailSendField::Body,
        MailSendField::IsHtml,
    ];

    pub fn definition(self) -> &'static FieldDefinition {
        &MAIL_SEND_FIELDS[self as usize]
    }

    pub fn param_name(self) -> &'static str {
        self.definition().param_name
    }
}

static MAIL_SEND_FIELDS: [FieldDefinition; 7] = [
    FieldDefinition {
        key: "toAddress",
        param_name: "toAddress",
        rules: &[
            Rule::Required {
                message: "To address is required",
            },
            Rule::MaxLength {
                limit: ADDRESS_MAX_LENGTH,
                message: "To address must be at most 1000 characters",
            },
            Rule::EmailList {
                message: "To address is not a valid email list",
            },
        ],
    },
    FieldDefinition {
        key: "replyTo",
        param_name: "replyTo",
        rules: &[
            Rule::Required {
                message: "Reply-To is required",
            },
            Rule::MaxLength {
                limit: ADDRESS_MAX_LENGTH,
                message: "Reply-To must be at most 1000 characters",
            },
            Rule::EmailList {
                message: "Reply-To is not a valid email list",
            },
        ],
    },
    FieldDefinition {
        key: "ccAddress",
        param_name: "ccAddress",
        rules: &[
            Rule::MaxLength {
                limit: ADDRESS_MAX_LENGTH,
                message: "CC must be at most 1000 characters",
            },
            Rule::EmailList {
                message: "CC is not a valid email list",
            },
        ],
    },
    FieldDefinition {
        key: "bccAddress",
        param_name: "bccAddress",
        rules: &[
            Rule::MaxLength {
                limit: ADDRESS_MAX_LENGTH,
                message: "BCC must be at most 1000 characters",
            },
            Rule::EmailList {
                message: "BCC is not a valid email list",
            },
        ],
    },
    FieldDefinition {
        key: "subject",
        param_name: "subject",
        rules: &[
            Rule::Required {
                message: "Subject is required",
            },
            Rule::MaxLength {
                limit: SUBJECT_MAX_LENGTH,
                message: "Subject must be at most 255 characters",
            },
        ],
    },
    FieldDefinition {
        key: "body",
        param_name: "body",
        rules: &[
            Rule::Required {
                message: "Body is required",
            },
            Rule::MaxLength {
                limit: BODY_MAX_LENGTH,
                message: "Body must be at most 4000 characters",
            },
        ],
    },
    FieldDefinition {
        key: "isHtml",
        param_name: "isHtml",
        rules: &[],
    },
];

/// The send-mail form registry.
pub static MAIL_SEND: FieldRegistry = FieldRegistry {
    id: MAIL_SEND_REGISTRY_ID,
    fields: &MAIL_SEND_FIELDS,
};
