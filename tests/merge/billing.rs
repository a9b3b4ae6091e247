use kisuite::{SuiteContext, SuiteDecl, host::GroupTree};

use crate::SUITES;

#[linkme::distributed_slice(SUITES)]
static INVOICES: SuiteDecl<GroupTree> = SuiteDecl::new("app/billing/invoices", invoices);

#[linkme::distributed_slice(SUITES)]
static REFUNDS: SuiteDecl<GroupTree> = SuiteDecl::new("billing/refunds", refunds);

fn invoices(ctx: &mut SuiteContext<'_, GroupTree>) {
    ctx.host().it("totals line items", || {
        let lines = [120, 80, 300];
        assert_eq!(lines.iter().sum::<u32>(), 500);
    });
}

fn refunds(ctx: &mut SuiteContext<'_, GroupTree>) {
    ctx.host().it("are idempotent", || {
        let mut refunded = false;
        for _ in 0..2 {
            refunded = true;
        }
        assert!(refunded);
    });
}
