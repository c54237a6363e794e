//! In-memory repositories shared by service tests.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use uuid::Uuid;

use crate::audit::{AuditEntry, AuditLogRepositoryTrait, NewAuditEntry};
use crate::defects::{Defect, DefectRepositoryTrait, DefectType};
use crate::errors::{DatabaseError, Result};
use crate::ledger::{TaxHeadLedger, TaxHeadValues};
use crate::notices::{
    NewNotice, Notice, NoticeFilter, NoticeLedgerChange, NoticeRepositoryTrait, NoticeStatus,
    NoticeType, NoticeUpdate,
};
use crate::payments::{NewPayment, Payment, PaymentRepositoryTrait};
use crate::reconciliation::{
    ReconciliationFilter, ReconciliationRecord, ReconciliationRepositoryTrait,
};
use crate::settings::{Settings, SettingsRepositoryTrait, SettingsUpdate};
use crate::Error;

pub const TEST_GSTIN: &str = "27AAAAA0000A1Z5";

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn new_notice(number: &str, due_date: Option<NaiveDate>) -> NewNotice {
    NewNotice {
        id: None,
        notice_number: number.to_string(),
        gstin: TEST_GSTIN.to_string(),
        arn: None,
        notice_type: NoticeType::ShowCause,
        section: Some("73".to_string()),
        financial_year: Some("2023-24".to_string()),
        issue_date: None,
        due_date,
        status: NoticeStatus::Received,
    }
}

pub fn igst_ledger(tax: Decimal, interest: Decimal) -> TaxHeadLedger {
    TaxHeadLedger {
        igst: TaxHeadValues {
            tax,
            interest,
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Notices and defects in one store, so ledger changes apply atomically.
#[derive(Default)]
pub struct InMemoryLedgerStore {
    notices: Mutex<Vec<Notice>>,
    defects: Mutex<Vec<Defect>>,
    fail_next_apply: AtomicBool,
    apply_calls: Mutex<Vec<usize>>,
    apply_gate: Mutex<Option<ApplyGate>>,
}

/// Parks the next `apply_ledger_changes` call until released.
#[derive(Clone)]
pub struct ApplyGate {
    pub entered: Arc<Notify>,
    pub release: Arc<Notify>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Inserts a notice directly, bypassing validation.
    pub fn seed_notice(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }

    /// Inserts a defect directly. The owning notice's demand is not touched.
    pub fn seed_defect(&self, notice_id: &str, id: &str, ledger: TaxHeadLedger) -> Defect {
        let defect = Defect {
            id: id.to_string(),
            notice_id: notice_id.to_string(),
            defect_type: DefectType::ItcMismatch,
            description: None,
            ledger,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        };
        self.defects.lock().unwrap().push(defect.clone());
        defect
    }

    pub fn set_status(&self, notice_id: &str, status: NoticeStatus) {
        let mut notices = self.notices.lock().unwrap();
        if let Some(n) = notices.iter_mut().find(|n| n.id == notice_id) {
            n.status = status;
        }
    }

    pub fn set_demand(&self, notice_id: &str, demand: Decimal) {
        let mut notices = self.notices.lock().unwrap();
        if let Some(n) = notices.iter_mut().find(|n| n.id == notice_id) {
            n.demand_amount = demand;
        }
    }

    /// Makes the next `apply_ledger_changes` fail before writing anything.
    pub fn fail_next_apply(&self) {
        self.fail_next_apply.store(true, Ordering::SeqCst);
    }

    /// Bumps a notice's version as if another writer had committed.
    pub fn bump_version(&self, notice_id: &str) {
        let mut notices = self.notices.lock().unwrap();
        if let Some(n) = notices.iter_mut().find(|n| n.id == notice_id) {
            n.version += 1;
        }
    }

    /// Holds the next `apply_ledger_changes` call inside the store. The call
    /// signals `entered`, then waits for `release` before writing.
    pub fn hold_next_apply(&self) -> ApplyGate {
        let gate = ApplyGate {
            entered: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
        };
        *self.apply_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    /// Change-set sizes of every `apply_ledger_changes` call.
    pub fn apply_calls(&self) -> Vec<usize> {
        self.apply_calls.lock().unwrap().clone()
    }

    pub fn notice(&self, notice_id: &str) -> Notice {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .find(|n| n.id == notice_id)
            .cloned()
            .unwrap()
    }

    pub fn defect(&self, defect_id: &str) -> Defect {
        self.defects
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id == defect_id)
            .cloned()
            .unwrap()
    }

    pub fn defect_count(&self) -> usize {
        self.defects.lock().unwrap().len()
    }
}

#[async_trait]
impl NoticeRepositoryTrait for InMemoryLedgerStore {
    async fn create(&self, new_notice: NewNotice) -> Result<Notice> {
        let now = Utc::now().naive_utc();
        let notice = Notice {
            id: new_notice
                .id
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            notice_number: new_notice.notice_number,
            gstin: new_notice.gstin,
            arn: new_notice.arn,
            notice_type: new_notice.notice_type,
            section: new_notice.section,
            financial_year: new_notice.financial_year,
            issue_date: new_notice.issue_date,
            due_date: new_notice.due_date,
            status: new_notice.status,
            demand_amount: Decimal::ZERO,
            version: 0,
            created_at: now,
            updated_at: now,
        };
        self.notices.lock().unwrap().push(notice.clone());
        Ok(notice)
    }

    async fn update(&self, update: NoticeUpdate) -> Result<Notice> {
        let mut notices = self.notices.lock().unwrap();
        let notice = notices
            .iter_mut()
            .find(|n| n.id == update.id)
            .ok_or_else(|| Error::not_found(format!("Notice {}", update.id)))?;
        notice.notice_number = update.notice_number;
        notice.gstin = update.gstin;
        notice.arn = update.arn;
        notice.notice_type = update.notice_type;
        notice.section = update.section;
        notice.financial_year = update.financial_year;
        notice.issue_date = update.issue_date;
        notice.due_date = update.due_date;
        notice.status = update.status;
        notice.version += 1;
        notice.updated_at = Utc::now().naive_utc();
        Ok(notice.clone())
    }

    async fn delete(&self, notice_id: &str) -> Result<usize> {
        let mut notices = self.notices.lock().unwrap();
        let before = notices.len();
        notices.retain(|n| n.id != notice_id);
        let deleted = before - notices.len();
        self.defects
            .lock()
            .unwrap()
            .retain(|d| d.notice_id != notice_id);
        Ok(deleted)
    }

    fn get_by_id(&self, notice_id: &str) -> Result<Notice> {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .find(|n| n.id == notice_id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("Notice {}", notice_id)))
    }

    fn list(&self, filter: &NoticeFilter) -> Result<Vec<Notice>> {
        Ok(self
            .notices
            .lock()
            .unwrap()
            .iter()
            .filter(|n| filter.matches(n))
            .cloned()
            .collect())
    }

    async fn apply_ledger_changes(&self, changes: Vec<NoticeLedgerChange>) -> Result<usize> {
        self.apply_calls.lock().unwrap().push(changes.len());
        let gate = self.apply_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        if self.fail_next_apply.swap(false, Ordering::SeqCst) {
            return Err(Error::Database(DatabaseError::TransactionFailed(
                "injected failure".to_string(),
            )));
        }

        let mut notices = self.notices.lock().unwrap();
        let mut defects = self.defects.lock().unwrap();

        for change in &changes {
            let notice = notices
                .iter()
                .find(|n| n.id == change.notice_id)
                .ok_or_else(|| Error::not_found(format!("Notice {}", change.notice_id)))?;
            if notice.version != change.expected_version {
                return Err(Error::ConcurrentModification(format!(
                    "Notice {} is at version {}, expected {}",
                    notice.id, notice.version, change.expected_version
                )));
            }
        }

        let now = Utc::now().naive_utc();
        for change in &changes {
            defects.retain(|d| !change.deleted_defect_ids.contains(&d.id));
            for defect in &change.upserted_defects {
                match defects.iter_mut().find(|d| d.id == defect.id) {
                    Some(existing) => *existing = defect.clone(),
                    None => defects.push(defect.clone()),
                }
            }
            if let Some(notice) = notices.iter_mut().find(|n| n.id == change.notice_id) {
                notice.demand_amount = change.demand_amount;
                notice.version += 1;
                notice.updated_at = now;
            }
        }
        Ok(changes.len())
    }
}

impl DefectRepositoryTrait for InMemoryLedgerStore {
    fn get_by_id(&self, defect_id: &str) -> Result<Defect> {
        self.defects
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id == defect_id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("Defect {}", defect_id)))
    }

    fn list_by_notice(&self, notice_id: &str) -> Result<Vec<Defect>> {
        Ok(self
            .defects
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.notice_id == notice_id)
            .cloned()
            .collect())
    }

    fn list_by_notices(&self, notice_ids: &[String]) -> Result<Vec<Defect>> {
        Ok(self
            .defects
            .lock()
            .unwrap()
            .iter()
            .filter(|d| notice_ids.contains(&d.notice_id))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryAuditLog {
    entries: Mutex<Vec<AuditEntry>>,
}

impl InMemoryAuditLog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuditLogRepositoryTrait for InMemoryAuditLog {
    async fn record(&self, entry: NewAuditEntry) -> Result<AuditEntry> {
        let entry = AuditEntry {
            id: Uuid::new_v4().to_string(),
            entity_type: entry.entity_type,
            entity_id: entry.entity_id,
            action: entry.action,
            actor: entry.actor,
            details: entry.details,
            recorded_at: entry.recorded_at,
        };
        self.entries.lock().unwrap().push(entry.clone());
        Ok(entry)
    }

    fn list_for_entity(&self, entity_type: &str, entity_id: &str) -> Result<Vec<AuditEntry>> {
        let mut entries: Vec<AuditEntry> = self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.entity_type == entity_type && e.entity_id == entity_id)
            .cloned()
            .collect();
        entries.reverse();
        Ok(entries)
    }
}

#[derive(Default)]
pub struct InMemorySettingsRepository {
    pairs: Mutex<HashMap<String, String>>,
}

impl InMemorySettingsRepository {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl SettingsRepositoryTrait for InMemorySettingsRepository {
    fn get_settings(&self) -> Result<Settings> {
        Ok(Settings::from_pairs(self.pairs.lock().unwrap().clone()))
    }

    async fn update_settings(&self, new_settings: &SettingsUpdate) -> Result<()> {
        let mut pairs = self.pairs.lock().unwrap();
        for (key, value) in new_settings.to_pairs() {
            pairs.insert(key.to_string(), value);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryReconciliationRepository {
    records: Mutex<Vec<ReconciliationRecord>>,
    stale_reads: Mutex<Vec<ReconciliationRecord>>,
}

impl InMemoryReconciliationRepository {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Serves `snapshot` on the next `get_by_id` for its record, as if the
    /// caller had read before later saves landed.
    pub fn serve_stale_read(&self, snapshot: ReconciliationRecord) {
        self.stale_reads.lock().unwrap().push(snapshot);
    }
}

#[async_trait]
impl ReconciliationRepositoryTrait for InMemoryReconciliationRepository {
    async fn create(&self, record: ReconciliationRecord) -> Result<ReconciliationRecord> {
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn save(&self, mut record: ReconciliationRecord) -> Result<ReconciliationRecord> {
        let mut records = self.records.lock().unwrap();
        let slot = records
            .iter_mut()
            .find(|r| r.id == record.id)
            .ok_or_else(|| Error::not_found(format!("Reconciliation record {}", record.id)))?;
        if slot.version != record.version {
            return Err(Error::ConcurrentModification(format!(
                "Reconciliation record {} is at version {}, expected {}",
                record.id, slot.version, record.version
            )));
        }
        record.version += 1;
        *slot = record.clone();
        Ok(record)
    }

    async fn delete(&self, record_id: &str) -> Result<usize> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id != record_id);
        Ok(before - records.len())
    }

    fn get_by_id(&self, record_id: &str) -> Result<ReconciliationRecord> {
        let mut stale = self.stale_reads.lock().unwrap();
        if let Some(pos) = stale.iter().position(|r| r.id == record_id) {
            return Ok(stale.remove(pos));
        }
        drop(stale);
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == record_id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("Reconciliation record {}", record_id)))
    }

    fn list(&self, filter: &ReconciliationFilter) -> Result<Vec<ReconciliationRecord>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| filter.gstin.as_ref().map_or(true, |g| &r.gstin == g))
            .filter(|r| {
                filter
                    .financial_year
                    .as_ref()
                    .map_or(true, |fy| &r.financial_year == fy)
            })
            .filter(|r| {
                filter
                    .notice_id
                    .as_ref()
                    .map_or(true, |id| r.notice_id.as_ref() == Some(id))
            })
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryPaymentRepository {
    payments: Mutex<Vec<Payment>>,
}

impl InMemoryPaymentRepository {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl PaymentRepositoryTrait for InMemoryPaymentRepository {
    async fn create(&self, new_payment: NewPayment) -> Result<Payment> {
        let payment = Payment {
            id: Uuid::new_v4().to_string(),
            notice_id: new_payment.notice_id,
            defect_id: new_payment.defect_id,
            head: new_payment.head,
            amount: new_payment.amount,
            payment_date: new_payment.payment_date,
            reference: new_payment.reference,
            created_at: Utc::now().naive_utc(),
        };
        self.payments.lock().unwrap().push(payment.clone());
        Ok(payment)
    }

    async fn delete(&self, payment_id: &str) -> Result<usize> {
        let mut payments = self.payments.lock().unwrap();
        let before = payments.len();
        payments.retain(|p| p.id != payment_id);
        Ok(before - payments.len())
    }

    fn list_by_notice(&self, notice_id: &str) -> Result<Vec<Payment>> {
        let mut payments: Vec<Payment> = self
            .payments
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.notice_id == notice_id)
            .cloned()
            .collect();
        payments.sort_by_key(|p| p.payment_date);
        Ok(payments)
    }
}
