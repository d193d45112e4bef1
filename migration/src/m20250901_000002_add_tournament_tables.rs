use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum TournamentRounds {
    Table,
    Id,
    EventId,
    RoundNumber,
    StartDatetime,
    EndDatetime,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TournamentMatches {
    Table,
    Id,
    RoundId,
    BoardNumber,
    WhitePlayerId,
    BlackPlayerId,
    Result,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TournamentRounds::Table)
                    .if_not_exists()
                    .col(&mut crate::id_column(manager, TournamentRounds::Id))
                    .col(
                        ColumnDef::new(TournamentRounds::EventId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TournamentRounds::RoundNumber)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TournamentRounds::StartDatetime)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(TournamentRounds::EndDatetime)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(TournamentRounds::Status)
                            .string_len(20)
                            .not_null()
                            .default("scheduled"),
                    )
                    .col(
                        ColumnDef::new(TournamentRounds::CreatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(TournamentRounds::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // one round per number within an event
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_tournament_rounds_event_round_unique")
                    .table(TournamentRounds::Table)
                    .col(TournamentRounds::EventId)
                    .col(TournamentRounds::RoundNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TournamentMatches::Table)
                    .if_not_exists()
                    .col(&mut crate::id_column(manager, TournamentMatches::Id))
                    .col(
                        ColumnDef::new(TournamentMatches::RoundId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TournamentMatches::BoardNumber).integer().null())
                    .col(
                        ColumnDef::new(TournamentMatches::WhitePlayerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TournamentMatches::BlackPlayerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TournamentMatches::Result).string_len(10).null())
                    .col(
                        ColumnDef::new(TournamentMatches::Status)
                            .string_len(20)
                            .not_null()
                            .default("scheduled"),
                    )
                    .col(
                        ColumnDef::new(TournamentMatches::CreatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(TournamentMatches::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tournament_matches_round_id")
                            .from(TournamentMatches::Table, TournamentMatches::RoundId)
                            .to(TournamentRounds::Table, TournamentRounds::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_tournament_matches_round_id")
                    .table(TournamentMatches::Table)
                    .col(TournamentMatches::RoundId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TournamentMatches::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TournamentRounds::Table).to_owned())
            .await?;
        Ok(())
    }
}
