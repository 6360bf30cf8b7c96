//! Table bindings for each stored entity

use std::convert::Infallible;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use shared::models::{
    AnalyticsEvent, Business, Category, Enquiry, EnquiryStatusChange, NewAnalyticsEvent,
    NewBusiness, NewCategory, NewEnquiry, NewUser, User, VerificationChange,
};

use super::{Column, FieldValue, Record};

// ============================================================================
// Enquiries
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnquiryField {
    Id,
    ProviderId,
    CustomerName,
    CustomerPhone,
    CustomerEmail,
    Message,
    Status,
    CreatedAt,
    UpdatedAt,
}

impl Column for EnquiryField {
    fn name(&self) -> &'static str {
        match self {
            EnquiryField::Id => "id",
            EnquiryField::ProviderId => "provider_id",
            EnquiryField::CustomerName => "customer_name",
            EnquiryField::CustomerPhone => "customer_phone",
            EnquiryField::CustomerEmail => "customer_email",
            EnquiryField::Message => "message",
            EnquiryField::Status => "status",
            EnquiryField::CreatedAt => "created_at",
            EnquiryField::UpdatedAt => "updated_at",
        }
    }
}

impl Record for Enquiry {
    const TABLE: &'static str = "enquiries";
    const COLUMNS: &'static [EnquiryField] = &[
        EnquiryField::Id,
        EnquiryField::ProviderId,
        EnquiryField::CustomerName,
        EnquiryField::CustomerPhone,
        EnquiryField::CustomerEmail,
        EnquiryField::Message,
        EnquiryField::Status,
        EnquiryField::CreatedAt,
        EnquiryField::UpdatedAt,
    ];

    type Field = EnquiryField;
    type Insert = NewEnquiry;
    /// Status is the only mutable attribute
    type Patch = EnquiryStatusChange;

    fn value(&self, field: EnquiryField) -> FieldValue {
        match field {
            EnquiryField::Id => self.id.into(),
            EnquiryField::ProviderId => self.provider_id.into(),
            EnquiryField::CustomerName => self.customer_name.as_str().into(),
            EnquiryField::CustomerPhone => self.customer_phone.as_str().into(),
            EnquiryField::CustomerEmail => self.customer_email.as_deref().into(),
            EnquiryField::Message => self.message.as_str().into(),
            EnquiryField::Status => self.status.as_str().into(),
            EnquiryField::CreatedAt => self.created_at.into(),
            EnquiryField::UpdatedAt => self.updated_at.into(),
        }
    }

    fn insert_values(insert: &NewEnquiry) -> Vec<(EnquiryField, FieldValue)> {
        vec![
            (EnquiryField::ProviderId, insert.provider_id.into()),
            (EnquiryField::CustomerName, insert.customer_name.as_str().into()),
            (EnquiryField::CustomerPhone, insert.customer_phone.as_str().into()),
            (EnquiryField::CustomerEmail, insert.customer_email.as_deref().into()),
            (EnquiryField::Message, insert.message.as_str().into()),
            (EnquiryField::Status, insert.status.as_str().into()),
        ]
    }

    fn patch_values(patch: &EnquiryStatusChange) -> Vec<(EnquiryField, FieldValue)> {
        vec![
            (EnquiryField::Status, patch.status.as_str().into()),
            (EnquiryField::UpdatedAt, patch.updated_at.into()),
        ]
    }

    fn materialize(id: Uuid, now: DateTime<Utc>, insert: NewEnquiry) -> Self {
        Enquiry {
            id,
            provider_id: insert.provider_id,
            customer_name: insert.customer_name,
            customer_phone: insert.customer_phone,
            customer_email: insert.customer_email,
            message: insert.message,
            status: insert.status,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, patch: &EnquiryStatusChange) {
        self.status = patch.status;
        self.updated_at = patch.updated_at;
    }
}

// ============================================================================
// Analytics events
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalyticsField {
    Id,
    ProviderId,
    EventType,
    Metadata,
    CreatedAt,
}

impl Column for AnalyticsField {
    fn name(&self) -> &'static str {
        match self {
            AnalyticsField::Id => "id",
            AnalyticsField::ProviderId => "provider_id",
            AnalyticsField::EventType => "event_type",
            AnalyticsField::Metadata => "metadata",
            AnalyticsField::CreatedAt => "created_at",
        }
    }
}

impl Record for AnalyticsEvent {
    const TABLE: &'static str = "analytics_events";
    const COLUMNS: &'static [AnalyticsField] = &[
        AnalyticsField::Id,
        AnalyticsField::ProviderId,
        AnalyticsField::EventType,
        AnalyticsField::Metadata,
        AnalyticsField::CreatedAt,
    ];

    type Field = AnalyticsField;
    type Insert = NewAnalyticsEvent;
    /// Events are append-only
    type Patch = Infallible;

    fn value(&self, field: AnalyticsField) -> FieldValue {
        match field {
            AnalyticsField::Id => self.id.into(),
            AnalyticsField::ProviderId => self.provider_id.into(),
            AnalyticsField::EventType => self.event_type.as_str().into(),
            AnalyticsField::Metadata => self.metadata.clone().into(),
            AnalyticsField::CreatedAt => self.created_at.into(),
        }
    }

    fn insert_values(insert: &NewAnalyticsEvent) -> Vec<(AnalyticsField, FieldValue)> {
        vec![
            (AnalyticsField::ProviderId, insert.provider_id.into()),
            (AnalyticsField::EventType, insert.event_type.as_str().into()),
            (AnalyticsField::Metadata, insert.metadata.clone().into()),
        ]
    }

    fn patch_values(patch: &Infallible) -> Vec<(AnalyticsField, FieldValue)> {
        match *patch {}
    }

    fn materialize(id: Uuid, now: DateTime<Utc>, insert: NewAnalyticsEvent) -> Self {
        AnalyticsEvent {
            id,
            provider_id: insert.provider_id,
            event_type: insert.event_type,
            metadata: insert.metadata,
            created_at: now,
        }
    }

    fn apply(&mut self, patch: &Infallible) {
        match *patch {}
    }
}

// ============================================================================
// Business listings
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusinessField {
    Id,
    BusinessName,
    City,
    Phone,
    IsVerified,
    CreatedAt,
    Slug,
}

impl Column for BusinessField {
    fn name(&self) -> &'static str {
        match self {
            BusinessField::Id => "id",
            BusinessField::BusinessName => "business_name",
            BusinessField::City => "city",
            BusinessField::Phone => "phone",
            BusinessField::IsVerified => "is_verified",
            BusinessField::CreatedAt => "created_at",
            BusinessField::Slug => "slug",
        }
    }
}

impl Record for Business {
    const TABLE: &'static str = "providers";
    const COLUMNS: &'static [BusinessField] = &[
        BusinessField::Id,
        BusinessField::BusinessName,
        BusinessField::City,
        BusinessField::Phone,
        BusinessField::IsVerified,
        BusinessField::CreatedAt,
        BusinessField::Slug,
    ];

    type Field = BusinessField;
    type Insert = NewBusiness;
    type Patch = VerificationChange;

    fn value(&self, field: BusinessField) -> FieldValue {
        match field {
            BusinessField::Id => self.id.into(),
            BusinessField::BusinessName => self.business_name.as_str().into(),
            BusinessField::City => self.city.as_deref().into(),
            BusinessField::Phone => self.phone.as_deref().into(),
            BusinessField::IsVerified => self.is_verified.into(),
            BusinessField::CreatedAt => self.created_at.into(),
            BusinessField::Slug => self.slug.as_str().into(),
        }
    }

    fn insert_values(insert: &NewBusiness) -> Vec<(BusinessField, FieldValue)> {
        vec![
            (BusinessField::BusinessName, insert.business_name.as_str().into()),
            (BusinessField::City, insert.city.as_deref().into()),
            (BusinessField::Phone, insert.phone.as_deref().into()),
            (BusinessField::IsVerified, insert.is_verified.into()),
            (BusinessField::Slug, insert.slug.as_str().into()),
        ]
    }

    fn patch_values(patch: &VerificationChange) -> Vec<(BusinessField, FieldValue)> {
        vec![(BusinessField::IsVerified, patch.is_verified.into())]
    }

    fn materialize(id: Uuid, now: DateTime<Utc>, insert: NewBusiness) -> Self {
        Business {
            id,
            business_name: insert.business_name,
            city: insert.city,
            phone: insert.phone,
            is_verified: insert.is_verified,
            created_at: now,
            slug: insert.slug,
        }
    }

    fn apply(&mut self, patch: &VerificationChange) {
        self.is_verified = patch.is_verified;
    }
}

// ============================================================================
// Users
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserField {
    Id,
    Email,
    Name,
    Role,
    City,
    CreatedAt,
}

impl Column for UserField {
    fn name(&self) -> &'static str {
        match self {
            UserField::Id => "id",
            UserField::Email => "email",
            UserField::Name => "name",
            UserField::Role => "role",
            UserField::City => "city",
            UserField::CreatedAt => "created_at",
        }
    }
}

impl Record for User {
    const TABLE: &'static str = "users";
    const COLUMNS: &'static [UserField] = &[
        UserField::Id,
        UserField::Email,
        UserField::Name,
        UserField::Role,
        UserField::City,
        UserField::CreatedAt,
    ];

    type Field = UserField;
    type Insert = NewUser;
    /// Read-only from the back office
    type Patch = Infallible;

    fn value(&self, field: UserField) -> FieldValue {
        match field {
            UserField::Id => self.id.into(),
            UserField::Email => self.email.as_deref().into(),
            UserField::Name => self.name.as_deref().into(),
            UserField::Role => self.role.as_str().into(),
            UserField::City => self.city.as_deref().into(),
            UserField::CreatedAt => self.created_at.into(),
        }
    }

    fn insert_values(insert: &NewUser) -> Vec<(UserField, FieldValue)> {
        vec![
            (UserField::Email, insert.email.as_deref().into()),
            (UserField::Name, insert.name.as_deref().into()),
            (UserField::Role, insert.role.as_str().into()),
            (UserField::City, insert.city.as_deref().into()),
        ]
    }

    fn patch_values(patch: &Infallible) -> Vec<(UserField, FieldValue)> {
        match *patch {}
    }

    fn materialize(id: Uuid, now: DateTime<Utc>, insert: NewUser) -> Self {
        User {
            id,
            email: insert.email,
            name: insert.name,
            role: insert.role,
            city: insert.city,
            created_at: now,
        }
    }

    fn apply(&mut self, patch: &Infallible) {
        match *patch {}
    }
}

// ============================================================================
// Categories
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryField {
    Id,
    Name,
    Slug,
    Icon,
    Description,
}

impl Column for CategoryField {
    fn name(&self) -> &'static str {
        match self {
            CategoryField::Id => "id",
            CategoryField::Name => "name",
            CategoryField::Slug => "slug",
            CategoryField::Icon => "icon",
            CategoryField::Description => "description",
        }
    }
}

impl Record for Category {
    const TABLE: &'static str = "categories";
    const COLUMNS: &'static [CategoryField] = &[
        CategoryField::Id,
        CategoryField::Name,
        CategoryField::Slug,
        CategoryField::Icon,
        CategoryField::Description,
    ];

    type Field = CategoryField;
    type Insert = NewCategory;
    type Patch = Infallible;

    fn value(&self, field: CategoryField) -> FieldValue {
        match field {
            CategoryField::Id => self.id.into(),
            CategoryField::Name => self.name.as_str().into(),
            CategoryField::Slug => self.slug.as_str().into(),
            CategoryField::Icon => self.icon.as_deref().into(),
            CategoryField::Description => self.description.as_deref().into(),
        }
    }

    fn insert_values(insert: &NewCategory) -> Vec<(CategoryField, FieldValue)> {
        vec![
            (CategoryField::Name, insert.name.as_str().into()),
            (CategoryField::Slug, insert.slug.as_str().into()),
            (CategoryField::Icon, insert.icon.as_deref().into()),
            (CategoryField::Description, insert.description.as_deref().into()),
        ]
    }

    fn patch_values(patch: &Infallible) -> Vec<(CategoryField, FieldValue)> {
        match *patch {}
    }

    fn materialize(id: Uuid, _now: DateTime<Utc>, insert: NewCategory) -> Self {
        Category {
            id,
            name: insert.name,
            slug: insert.slug,
            icon: insert.icon,
            description: insert.description,
        }
    }

    fn apply(&mut self, patch: &Infallible) {
        match *patch {}
    }
}
