//! Wedding endpoints. All of them require a privileged user.

use api_types::{
    PageQuery,
    wedding::{
        PartyBody, PartyUpdate, ReserveMethod as ApiReserveMethod, SettlementView, SharesView,
        SideCostsBody, SplitMethod as ApiSplitMethod, WeddingDetailResponse, WeddingListResponse,
        WeddingNew, WeddingUpdate, WeddingView,
    },
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use engine::{
    Actor, Money, NewWeddingCmd, Party, PartyPatch, ReserveMethod, Settlement, Shares, SideCosts,
    SplitMethod, UpdateWeddingCmd, Wedding,
};
use uuid::Uuid;

use crate::{ServerError, parse_cursor, server::ServerState};

fn map_split(method: ApiSplitMethod) -> SplitMethod {
    match method {
        ApiSplitMethod::Half => SplitMethod::Half,
        ApiSplitMethod::Husband => SplitMethod::Husband,
        ApiSplitMethod::Bride => SplitMethod::Bride,
        ApiSplitMethod::Privacy => SplitMethod::Privacy,
    }
}

fn split_view(method: SplitMethod) -> ApiSplitMethod {
    match method {
        SplitMethod::Half => ApiSplitMethod::Half,
        SplitMethod::Husband => ApiSplitMethod::Husband,
        SplitMethod::Bride => ApiSplitMethod::Bride,
        SplitMethod::Privacy => ApiSplitMethod::Privacy,
    }
}

fn map_reserve(method: ApiReserveMethod) -> ReserveMethod {
    match method {
        ApiReserveMethod::Half => ReserveMethod::Half,
        ApiReserveMethod::Husband => ReserveMethod::Husband,
        ApiReserveMethod::Bride => ReserveMethod::Bride,
    }
}

fn reserve_view(method: ReserveMethod) -> ApiReserveMethod {
    match method {
        ReserveMethod::Half => ApiReserveMethod::Half,
        ReserveMethod::Husband => ApiReserveMethod::Husband,
        ReserveMethod::Bride => ApiReserveMethod::Bride,
    }
}

fn map_costs(costs: SideCostsBody) -> SideCosts {
    SideCosts {
        hall_rental: Money::new(costs.hall_rental),
        sword_rental: Money::new(costs.sword_rental),
        bouquet: Money::new(costs.bouquet),
        operator_fee: Money::new(costs.operator_fee),
        grooming_female: Money::new(costs.grooming_female),
        grooming_male: Money::new(costs.grooming_male),
        frame: Money::new(costs.frame),
        raw_file: Money::new(costs.raw_file),
        video: Money::new(costs.video),
        misc: Money::new(costs.misc),
    }
}

fn costs_view(costs: SideCosts) -> SideCostsBody {
    SideCostsBody {
        hall_rental: costs.hall_rental.units(),
        sword_rental: costs.sword_rental.units(),
        bouquet: costs.bouquet.units(),
        operator_fee: costs.operator_fee.units(),
        grooming_female: costs.grooming_female.units(),
        grooming_male: costs.grooming_male.units(),
        frame: costs.frame.units(),
        raw_file: costs.raw_file.units(),
        video: costs.video.units(),
        misc: costs.misc.units(),
    }
}

fn map_party(party: PartyBody) -> Party {
    Party {
        name: party.name,
        image: party.image,
        costs: map_costs(party.costs),
        meal_count: party.meal_count,
        present_count: party.present_count,
        pre_deposit: Money::new(party.pre_deposit),
    }
}

fn party_view(party: Party) -> PartyBody {
    PartyBody {
        name: party.name,
        image: party.image,
        costs: costs_view(party.costs),
        meal_count: party.meal_count,
        present_count: party.present_count,
        pre_deposit: party.pre_deposit.units(),
    }
}

fn map_party_patch(update: PartyUpdate) -> PartyPatch {
    PartyPatch {
        name: update.name,
        image: update.image,
        costs: update.costs.map(map_costs),
        meal_count: update.meal_count,
        present_count: update.present_count,
        pre_deposit: update.pre_deposit.map(Money::new),
    }
}

fn wedding_view(wedding: Wedding) -> WeddingView {
    WeddingView {
        id: wedding.id,
        wedding_at: wedding.wedding_at,
        event_at: wedding.event_at,
        meal_method: split_view(wedding.meal_method),
        present_method: split_view(wedding.present_method),
        reserve_method: reserve_view(wedding.reserve_method),
        meal_price: wedding.meal_price.units(),
        present_price: wedding.present_price.units(),
        reserve_price: wedding.reserve_price.units(),
        husband: party_view(wedding.husband),
        bride: party_view(wedding.bride),
        created_at: wedding.created_at,
    }
}

fn shares_view(shares: Shares) -> SharesView {
    SharesView {
        husband: shares.husband.units(),
        bride: shares.bride.units(),
    }
}

fn settlement_view(s: Settlement) -> SettlementView {
    SettlementView {
        fixed: shares_view(s.fixed),
        all_meal_cost: s.all_meal_cost.units(),
        meal: shares_view(s.meal),
        all_present_cost: s.all_present_cost.units(),
        present: shares_view(s.present),
        reserve: shares_view(s.reserve),
        all_cost: s.all_cost.units(),
        all_payment: s.all_payment.units(),
        husband_payment: s.husband_payment.units(),
        bride_payment: s.bride_payment.units(),
    }
}

fn detail(wedding: Wedding) -> Result<WeddingDetailResponse, ServerError> {
    let settlement = wedding.settlement()?;
    Ok(WeddingDetailResponse {
        wedding: wedding_view(wedding),
        settlement: settlement_view(settlement),
    })
}

pub async fn wedding_new(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
    Json(payload): Json<WeddingNew>,
) -> Result<(StatusCode, Json<WeddingDetailResponse>), ServerError> {
    let wedding = state
        .engine
        .new_wedding(
            NewWeddingCmd {
                wedding_at: payload.wedding_at,
                event_at: payload.event_at,
                meal_method: map_split(payload.meal_method),
                present_method: map_split(payload.present_method),
                reserve_method: map_reserve(payload.reserve_method),
                meal_price: Money::new(payload.meal_price),
                present_price: Money::new(payload.present_price),
                reserve_price: Money::new(payload.reserve_price),
                husband: map_party(payload.husband),
                bride: map_party(payload.bride),
            },
            &actor,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(detail(wedding)?)))
}

pub async fn get(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
    Path(wedding_id): Path<Uuid>,
) -> Result<Json<WeddingDetailResponse>, ServerError> {
    let wedding = state.engine.wedding(wedding_id, &actor).await?;
    Ok(Json(detail(wedding)?))
}

pub async fn update(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
    Path(wedding_id): Path<Uuid>,
    Json(payload): Json<WeddingUpdate>,
) -> Result<Json<WeddingDetailResponse>, ServerError> {
    let cmd = UpdateWeddingCmd {
        wedding_at: payload.wedding_at,
        event_at: payload.event_at,
        meal_method: payload.meal_method.map(map_split),
        present_method: payload.present_method.map(map_split),
        reserve_method: payload.reserve_method.map(map_reserve),
        meal_price: payload.meal_price.map(Money::new),
        present_price: payload.present_price.map(Money::new),
        reserve_price: payload.reserve_price.map(Money::new),
        husband: map_party_patch(payload.husband),
        bride: map_party_patch(payload.bride),
    };
    let wedding = state
        .engine
        .update_wedding(wedding_id, cmd, &actor)
        .await?;
    Ok(Json(detail(wedding)?))
}

pub async fn delete(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
    Path(wedding_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_wedding(wedding_id, &actor).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list(
    Extension(actor): Extension<Actor>,
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<WeddingListResponse>, ServerError> {
    let cursor = parse_cursor(query.cursor.as_deref())?;
    let page = state
        .engine
        .list_weddings_page(&actor, cursor, query.limit)
        .await?;
    Ok(Json(WeddingListResponse {
        weddings: page.items.into_iter().map(wedding_view).collect(),
        next_cursor: page.next_cursor,
    }))
}
