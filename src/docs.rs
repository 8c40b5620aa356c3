// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::get_me,
        handlers::auth::request_reset,
        handlers::auth::validate_reset,
        handlers::auth::reset_password,

        // --- Users ---
        handlers::users::authenticate_manager,
        handlers::users::list_users,
        handlers::users::create_user,
        handlers::users::get_user,
        handlers::users::update_user,
        handlers::users::delete_user,

        // --- Register ---
        handlers::registers::open,
        handlers::registers::current,
        handlers::registers::dashboard,
        handlers::registers::withdrawal,
        handlers::registers::close,
        handlers::registers::history,

        // --- Sales ---
        handlers::sales::create,
        handlers::sales::cancel,
        handlers::sales::list,
        handlers::sales::detail,

        // --- Reports ---
        handlers::reports::daily,
        handlers::reports::weekly,
        handlers::reports::monthly,
        handlers::reports::products,
        handlers::reports::daily_export,
        handlers::reports::weekly_export,
        handlers::reports::monthly_export,
        handlers::reports::products_export,

        // --- Catalog ---
        handlers::catalog::list_products,
        handlers::catalog::create_product,
        handlers::catalog::get_product,
        handlers::catalog::update_product,
        handlers::catalog::delete_product,
        handlers::catalog::list_categories,
        handlers::catalog::create_category,
        handlers::catalog::get_category,
        handlers::catalog::update_category,
        handlers::catalog::delete_category,
        handlers::catalog::list_suppliers,
        handlers::catalog::create_supplier,
        handlers::catalog::get_supplier,
        handlers::catalog::update_supplier,
        handlers::catalog::delete_supplier,
        handlers::catalog::list_consumers,
        handlers::catalog::create_consumer,
        handlers::catalog::get_consumer,
        handlers::catalog::update_consumer,
        handlers::catalog::delete_consumer,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserRole,
            models::auth::User,
            models::auth::LoginPayload,
            models::auth::AuthResponse,
            models::auth::ManagerAuthPayload,
            models::auth::ManagerAuthResponse,
            models::auth::CreateUserPayload,
            models::auth::UpdateUserPayload,
            models::auth::RequestResetPayload,
            models::auth::ResetPasswordPayload,

            // --- Catalog ---
            models::catalog::Product,
            models::catalog::ProductWithAlert,
            models::catalog::ProductPayload,
            models::catalog::Category,
            models::catalog::CategoryPayload,
            models::catalog::Supplier,
            models::catalog::SupplierPayload,
            models::catalog::Consumer,
            models::catalog::ConsumerPayload,

            // --- Register ---
            models::register::RegisterStatus,
            models::register::Register,
            models::register::Withdrawal,
            models::register::PaymentTotals,
            models::register::OpenRegisterPayload,
            models::register::CloseRegisterPayload,
            models::register::CloseRegisterResponse,
            models::register::WithdrawalPayload,
            models::register::RegisterDashboard,

            // --- Sales ---
            models::sale::PaymentMethod,
            models::sale::SaleStatus,
            models::sale::Sale,
            models::sale::SaleItem,
            models::sale::SaleDetail,
            models::sale::SaleItemPayload,
            models::sale::CreateSalePayload,
            models::sale::CancelSalePayload,

            // --- Reports ---
            models::report::PaymentMethodSummary,
            models::report::TopProductEntry,
            models::report::DailyReport,
            models::report::DayTotal,
            models::report::WeekTotal,
            models::report::WeeklyReport,
            models::report::MonthTotal,
            models::report::MonthlyReport,
            models::report::ProductReportEntry,
            models::report::ProductsReport,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e redefinição de senha"),
        (name = "Users", description = "Gestão de usuários e autorização de gerente"),
        (name = "Register", description = "Ciclo de vida do caixa (abertura, sangria, fechamento)"),
        (name = "Sales", description = "Registro e cancelamento de vendas"),
        (name = "Reports", description = "Relatórios gerenciais e exportação"),
        (name = "Catalog", description = "Produtos, categorias, fornecedores e clientes")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
