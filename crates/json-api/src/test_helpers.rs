//! Test helpers.

use std::sync::Arc;

use gazalla::{Category, Customer, OrderItem, OrderStatus, ShippingAddress};
use gazalla_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        orders::{
            MockOrdersService,
            models::{Order, OrderUuid},
        },
        products::{
            MockProductsService,
            models::{Product, ProductUuid},
        },
        users::{
            MockUsersService,
            models::{Role, User, UserUuid},
        },
    },
};
use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};

use crate::state::State;

/// Service mocks; any call without a matching expectation fails the test.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) products: MockProductsService,
    pub(crate) orders: MockOrdersService,
    pub(crate) users: MockUsersService,
    pub(crate) auth: MockAuthService,
}

impl Mocks {
    fn into_context(self) -> AppContext {
        AppContext::from_services(
            Arc::new(self.products),
            Arc::new(self.orders),
            Arc::new(self.users),
            Arc::new(self.auth),
        )
    }
}

pub(crate) fn service(mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(State::from_app_context(mocks.into_context())))
            .push(route),
    )
}

pub(crate) fn make_product(uuid: ProductUuid) -> Product {
    Product {
        uuid,
        name: "Leather Wallet".to_string(),
        description: "Genuine leather".to_string(),
        price: Decimal::new(4999, 2),
        category: Category::Men,
        image_url: "/images/wallet.jpg".to_string(),
        stock: 25,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_user(uuid: UserUuid, role: Role) -> User {
    User {
        uuid,
        name: "Grace Hopper".to_string(),
        email: "grace@example.com".to_string(),
        password_digest: "secret-digest".to_string(),
        role,
        created_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_order(uuid: OrderUuid) -> Order {
    Order {
        uuid,
        user_id: "grace@example.com".to_string(),
        customer: Customer {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            email: "grace@example.com".to_string(),
        },
        shipping_address: ShippingAddress {
            address: "1 Navy Yard".to_string(),
            city: "Arlington".to_string(),
            zip_code: "22202".to_string(),
        },
        items: vec![OrderItem {
            product_id: "wallet".to_string(),
            name: "Leather Wallet".to_string(),
            quantity: 2,
            price: Decimal::new(10, 0),
        }],
        total: Decimal::new(22, 0),
        status: OrderStatus::Pending,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
