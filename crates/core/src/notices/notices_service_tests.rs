#[cfg(test)]
mod tests {
    use crate::defects::{DefectService, DefectServiceTrait, DefectType, NewDefect};
    use crate::notices::{
        find_demand_drift, NoticeFilter, NoticeService, NoticeServiceTrait, NoticeStatus,
        NoticeUpdate,
    };
    use crate::test_support::*;
    use crate::Error;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn services() -> (Arc<InMemoryLedgerStore>, NoticeService, DefectService) {
        let store = InMemoryLedgerStore::new();
        let notices = NoticeService::new(store.clone(), store.clone());
        let defects = DefectService::new(store.clone(), store.clone());
        (store, notices, defects)
    }

    #[tokio::test]
    async fn test_create_notice_starts_with_zero_demand() {
        let (_, service, _) = services();
        let notice = service
            .create_notice(new_notice("SCN/1", Some(date(2024, 1, 1))))
            .await
            .unwrap();
        assert_eq!(notice.demand_amount, Decimal::ZERO);
        assert_eq!(notice.status, NoticeStatus::Received);
    }

    #[tokio::test]
    async fn test_create_notice_rejects_bad_gstin_and_dates() {
        let (_, service, _) = services();

        let mut bad_gstin = new_notice("SCN/1", None);
        bad_gstin.gstin = "27AAAA".to_string();
        assert!(matches!(
            service.create_notice(bad_gstin).await,
            Err(Error::Validation(_))
        ));

        let mut bad_dates = new_notice("SCN/2", Some(date(2024, 1, 1)));
        bad_dates.issue_date = Some(date(2024, 2, 1));
        assert!(matches!(
            service.create_notice(bad_dates).await,
            Err(Error::Validation(_))
        ));

        assert!(matches!(
            service.create_notice(new_notice("  ", None)).await,
            Err(Error::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_update_keeps_demand_and_bumps_version() {
        let (store, service, _) = services();
        let notice = service
            .create_notice(new_notice("SCN/1", Some(date(2024, 1, 1))))
            .await
            .unwrap();
        store.set_demand(&notice.id, dec!(1200));

        let updated = service
            .update_notice(NoticeUpdate {
                id: notice.id.clone(),
                notice_number: notice.notice_number.clone(),
                gstin: notice.gstin.clone(),
                arn: Some("ARN-77".to_string()),
                notice_type: notice.notice_type.clone(),
                section: notice.section.clone(),
                financial_year: notice.financial_year.clone(),
                issue_date: None,
                due_date: Some(date(2024, 3, 1)),
                status: NoticeStatus::ReplyFiled,
            })
            .await
            .unwrap();

        assert_eq!(updated.demand_amount, dec!(1200));
        assert_eq!(updated.version, notice.version + 1);
        assert_eq!(updated.status, NoticeStatus::ReplyFiled);
    }

    #[tokio::test]
    async fn test_delete_notice_removes_its_defects() {
        let (store, service, defects) = services();
        let notice = service
            .create_notice(new_notice("SCN/1", None))
            .await
            .unwrap();
        defects
            .create_defect(NewDefect {
                id: None,
                notice_id: notice.id.clone(),
                defect_type: DefectType::LateFiling,
                description: None,
                ledger: igst_ledger(dec!(100), Decimal::ZERO),
            })
            .await
            .unwrap();
        assert_eq!(store.defect_count(), 1);

        service.delete_notice(&notice.id).await.unwrap();

        assert_eq!(store.defect_count(), 0);
        assert!(service.get_notice(&notice.id).is_err());
    }

    #[tokio::test]
    async fn test_list_filters_open_overdue_notices() {
        let (store, service, _) = services();
        let overdue = service
            .create_notice(new_notice("SCN/1", Some(date(2024, 1, 1))))
            .await
            .unwrap();
        let closed = service
            .create_notice(new_notice("SCN/2", Some(date(2024, 1, 1))))
            .await
            .unwrap();
        store.set_status(&closed.id, NoticeStatus::Closed);
        service
            .create_notice(new_notice("SCN/3", Some(date(2024, 2, 10))))
            .await
            .unwrap();
        service.create_notice(new_notice("SCN/4", None)).await.unwrap();

        let listed = service
            .list_notices(&NoticeFilter::open_due_before(date(2024, 2, 10)))
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, overdue.id);
    }

    #[tokio::test]
    async fn test_verify_demand_integrity_reports_stale_notices() {
        let (store, service, defects) = services();
        let notice = service
            .create_notice(new_notice("SCN/1", None))
            .await
            .unwrap();
        defects
            .create_defect(NewDefect {
                id: None,
                notice_id: notice.id.clone(),
                defect_type: DefectType::ItcMismatch,
                description: None,
                ledger: igst_ledger(dec!(1000), dec!(50)),
            })
            .await
            .unwrap();
        assert!(service.verify_demand_integrity().unwrap().is_empty());

        store.set_demand(&notice.id, dec!(999));
        let drift = service.verify_demand_integrity().unwrap();
        assert_eq!(drift.len(), 1);
        assert_eq!(drift[0].stored_demand, dec!(999));
        assert_eq!(drift[0].computed_demand, dec!(1050));
    }

    #[test]
    fn test_notice_without_defects_must_have_zero_demand() {
        let mut notice = bare_notice();
        notice.demand_amount = dec!(10);

        let drift = find_demand_drift(&[notice], &[]);
        assert_eq!(drift.len(), 1);
        assert_eq!(drift[0].computed_demand, Decimal::ZERO);
    }

    fn bare_notice() -> crate::notices::Notice {
        crate::notices::Notice {
            id: "n1".to_string(),
            notice_number: "SCN/1".to_string(),
            gstin: TEST_GSTIN.to_string(),
            arn: None,
            notice_type: crate::notices::NoticeType::Scrutiny,
            section: None,
            financial_year: None,
            issue_date: None,
            due_date: None,
            status: NoticeStatus::Received,
            demand_amount: Decimal::ZERO,
            version: 0,
            created_at: chrono::NaiveDateTime::default(),
            updated_at: chrono::NaiveDateTime::default(),
        }
    }
}
