//! GraphQL Documents
//!
//! Operation documents for the admin (collection links) and shop (orders) APIs.

macro_rules! link_fields {
    () => {
        "
      __typename
      ... on CollectionUrlLink {
        id
        collectionId
        icon
        order
        translations {
          id
          languageCode
          name
          url
        }
      }
      ... on CollectionAssetLink {
        id
        collectionId
        icon
        order
        languageCode
        asset {
          id
          name
          source
        }
      }"
    };
}

macro_rules! order_fields {
    () => {
        "
    id
    code
    state
    customer {
      title
      firstName
      lastName
      phoneNumber
      emailAddress
    }
    lines {
      id
      productVariant {
        sku
        name
        options {
          name
        }
      }
      unitPrice
      unitPriceWithTax
      quantity
      linePriceWithTax
      adjustments {
        adjustmentSource
        type
        amount
      }
    }
    adjustments {
      adjustmentSource
      type
      description
      amount
    }
    couponCodes
    subTotalBeforeTax
    subTotal
    currencyCode
    shipping
    shippingWithTax
    taxSummary {
      taxRate
      taxBase
      taxTotal
    }
    totalBeforeTax
    total
    updatedAt"
    };
}

macro_rules! order_modification_result {
    ($field:literal, $args:literal) => {
        concat!(
            $field,
            $args,
            " {
      ... on Order {
        id
      }
      ... on ErrorResult {
        errorCode
        message
      }
    }"
        )
    };
}

// ========================
// Admin: collection links
// ========================

pub const ADMIN_GET_COLLECTION_LINKS_BY_SLUG: &str = concat!(
    "query CollectionLinks($slug: String!) {
  collection(slug: $slug) {
    id
    slug
    links {",
    link_fields!(),
    "
    }
  }
}"
);

pub const ADMIN_CREATE_COLLECTION_LINK_URL: &str = "mutation CreateCollectionUrlLink($input: CreateCollectionUrlLinkInput!) {
  createCollectionUrlLink(input: $input) {
    id
  }
}";

pub const ADMIN_CREATE_COLLECTION_LINK_ASSET: &str = "mutation CreateCollectionAssetLink($input: CreateCollectionAssetLinkInput!) {
  createCollectionAssetLink(input: $input) {
    id
  }
}";

pub const ADMIN_UPDATE_COLLECTION_LINK_URL: &str = "mutation UpdateCollectionUrlLink($input: UpdateCollectionUrlLinkInput!) {
  updateCollectionUrlLink(input: $input) {
    id
  }
}";

pub const ADMIN_UPDATE_COLLECTION_LINK_ASSET: &str = "mutation UpdateCollectionAssetLink($input: UpdateCollectionAssetLinkInput!) {
  updateCollectionAssetLink(input: $input) {
    id
  }
}";

pub const ADMIN_DELETE_COLLECTION_LINK: &str = "mutation DeleteCollectionLink($id: ID!) {
  deleteCollectionLink(id: $id) {
    result
    message
  }
}";

// ========================
// Shop: orders
// ========================

pub const GET_CURRENT_CUSTOMER_ORDERS: &str = concat!(
    "query CustomerOrders($skip: Int!, $take: Int!) {
  activeCustomer {
    orders(options: { skip: $skip, take: $take, sort: { updatedAt: DESC } }) {
      items {",
    order_fields!(),
    "
      }
      totalItems
    }
  }
}"
);

pub const GET_ACTIVE_ORDER: &str = concat!("query {\n  activeOrder {", order_fields!(), "\n  }\n}");

pub const GET_ORDER_BY_CODE: &str = concat!(
    "query OrderByCode($code: String!) {\n  orderByCode(code: $code) {",
    order_fields!(),
    "\n  }\n}"
);

pub const ADD_TO_ORDER: &str = concat!(
    "mutation AddItemToOrder($productVariantId: ID!, $quantity: Int!) {\n  ",
    order_modification_result!(
        "addItemToOrder",
        "(productVariantId: $productVariantId, quantity: $quantity)"
    ),
    "\n}"
);

pub const ADJUST_ORDER_LINE: &str = concat!(
    "mutation AdjustOrderLine($orderLineId: ID!, $quantity: Int!) {\n  ",
    order_modification_result!(
        "adjustOrderLine",
        "(orderLineId: $orderLineId, quantity: $quantity)"
    ),
    "\n}"
);

pub const REMOVE_ORDER_LINE: &str = concat!(
    "mutation RemoveOrderLine($orderLineId: ID!) {\n  ",
    order_modification_result!("removeOrderLine", "(orderLineId: $orderLineId)"),
    "\n}"
);
