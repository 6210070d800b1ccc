//! Audit metadata shared by all master-data rows.
//!
//! Every table carries the same creation, modification and soft-delete
//! columns. Only the service layer writes them, through [`Audited`].

use sea_orm::prelude::DateTimeUtc;

/// Who did what, when, and from which client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuditStamp {
    pub actor: String,
    pub at: DateTimeUtc,
    pub agent: String,
    pub timezone_offset: i32,
}

/// Read-only copy of a row's audit columns.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AuditSnapshot {
    pub created_by: String,
    pub created_utc: DateTimeUtc,
    pub last_modified_by: String,
    pub last_modified_utc: DateTimeUtc,
    pub timezone_offset: i32,
}

pub trait Audited {
    fn id(&self) -> i32;
    fn set_id(&mut self, id: i32);
    fn is_deleted(&self) -> bool;
    fn audit(&self) -> AuditSnapshot;
    /// Stamp creation; modification columns start equal to creation.
    fn stamp_created(&mut self, stamp: &AuditStamp);
    fn stamp_modified(&mut self, stamp: &AuditStamp);
    fn stamp_deleted(&mut self, stamp: &AuditStamp);
    /// Carry the creation block (and delete flag) of a stored row.
    fn keep_created_from(&mut self, stored: &Self);
}

/// Implement [`Audited`] for an entity `Model` with the standard columns.
#[macro_export]
macro_rules! impl_audited {
    ($model:ty) => {
        impl $crate::audit::Audited for $model {
            fn id(&self) -> i32 { self.id }

            fn set_id(&mut self, id: i32) { self.id = id; }

            fn is_deleted(&self) -> bool { self.is_deleted }

            fn audit(&self) -> $crate::audit::AuditSnapshot {
                $crate::audit::AuditSnapshot {
                    created_by: self.created_by.clone(),
                    created_utc: self.created_utc,
                    last_modified_by: self.last_modified_by.clone(),
                    last_modified_utc: self.last_modified_utc,
                    timezone_offset: self.timezone_offset,
                }
            }

            fn stamp_created(&mut self, stamp: &$crate::audit::AuditStamp) {
                self.created_by = stamp.actor.clone();
                self.created_utc = stamp.at;
                self.created_agent = stamp.agent.clone();
                self.is_deleted = false;
                self.deleted_by = None;
                self.deleted_utc = None;
                self.deleted_agent = None;
                self.stamp_modified(stamp);
            }

            fn stamp_modified(&mut self, stamp: &$crate::audit::AuditStamp) {
                self.last_modified_by = stamp.actor.clone();
                self.last_modified_utc = stamp.at;
                self.last_modified_agent = stamp.agent.clone();
                self.timezone_offset = stamp.timezone_offset;
            }

            fn stamp_deleted(&mut self, stamp: &$crate::audit::AuditStamp) {
                self.is_deleted = true;
                self.deleted_by = Some(stamp.actor.clone());
                self.deleted_utc = Some(stamp.at);
                self.deleted_agent = Some(stamp.agent.clone());
                self.stamp_modified(stamp);
            }

            fn keep_created_from(&mut self, stored: &Self) {
                self.created_by = stored.created_by.clone();
                self.created_utc = stored.created_utc;
                self.created_agent = stored.created_agent.clone();
                self.is_deleted = stored.is_deleted;
                self.deleted_by = stored.deleted_by.clone();
                self.deleted_utc = stored.deleted_utc;
                self.deleted_agent = stored.deleted_agent.clone();
            }
        }
    };
}
